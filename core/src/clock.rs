use web_time::Instant;

/// Monotonic time source used to schedule the delayed hide.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
