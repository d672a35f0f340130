use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortisation
// ---------------------------------------------------------------------------

#[napi]
pub fn build_amortisation_schedule(input_json: String) -> NapiResult<String> {
    let request: lending_core::amortisation::ScheduleRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = lending_core::amortisation::build_schedule(&request.terms, request.start_date)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[napi]
pub fn build_loan_quote(input_json: String) -> NapiResult<String> {
    let input: lending_core::products::QuoteInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = lending_core::products::build_quote(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Penalties
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_late_penalty(input_json: String) -> NapiResult<String> {
    let input: lending_core::penalties::PenaltyInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = lending_core::penalties::assess_penalty(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
