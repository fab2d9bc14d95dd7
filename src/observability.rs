use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("costbench.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("costbench.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("costbench.client.request_duration_seconds");

pub(crate) static SESSION_GREETINGS: Counter = Counter::new("costbench.session.greetings");
pub(crate) static SESSION_TURNS: Counter = Counter::new("costbench.session.turns");
pub(crate) static SESSION_FAILED_TURNS: Counter = Counter::new("costbench.session.failed_turns");
pub(crate) static SESSION_CANCELLED_TURNS: Counter =
    Counter::new("costbench.session.cancelled_turns");
pub(crate) static SESSION_REJECTED_INPUTS: Counter =
    Counter::new("costbench.session.rejected_inputs");
pub(crate) static SESSION_TURN_DURATION: Moments =
    Moments::new("costbench.session.turn_duration_seconds");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&SESSION_GREETINGS);
    collector.register_counter(&SESSION_TURNS);
    collector.register_counter(&SESSION_FAILED_TURNS);
    collector.register_counter(&SESSION_CANCELLED_TURNS);
    collector.register_counter(&SESSION_REJECTED_INPUTS);
    collector.register_moments(&SESSION_TURN_DURATION);
}
