use stockroom_core::AggregateId;

/// A command targets a specific aggregate (command abstraction).
///
/// Commands represent **intent** - a request to perform an action on an
/// aggregate. They are **transient** and are transformed into events by the
/// aggregate's decision logic.
///
/// - **Command**: intent to do something (e.g. "sell 3 units")
/// - **Event**: fact that something happened (e.g. `SaleCompleted { quantity: 3 }`)
///
/// Commands must own their data (`'static`) and be safe to copy around for
/// logging and replay.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn target_aggregate_id(&self) -> AggregateId;
}
