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
pub fn calculate_amortization(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::amortization::emi::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::amortization::emi::calculate_amortization(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn expand_schedule(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::amortization::emi::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_core::amortization::emi::expand_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct PrepaymentBindingInput {
    loan: mortgage_core::amortization::emi::LoanTerms,
    scenario: mortgage_core::amortization::prepayment::PrepaymentScenario,
}

#[napi]
pub fn simulate_prepayment(input_json: String) -> NapiResult<String> {
    let binding_input: PrepaymentBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::amortization::prepayment::simulate_prepayment(
        &binding_input.loan,
        &binding_input.scenario,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Down-payment policy
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_down_payment(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::policy::down_payment::DownPaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::policy::down_payment::evaluate_down_payment(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Upfront costs
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
struct UpfrontCostsBindingInput {
    #[serde(flatten)]
    inputs: mortgage_core::costs::upfront::PropertyCostInputs,
    down_payment: rust_decimal::Decimal,
}

#[napi]
pub fn calculate_upfront_costs(input_json: String) -> NapiResult<String> {
    let binding_input: UpfrontCostsBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::costs::upfront::calculate_upfront_costs(
        &binding_input.inputs,
        binding_input.down_payment,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_eligibility(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::eligibility::EligibilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_core::eligibility::evaluate_eligibility(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
