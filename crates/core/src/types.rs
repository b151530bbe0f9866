/// Opaque vendor-assigned identifier of a prediction / task.
pub type PredictionId = String;
