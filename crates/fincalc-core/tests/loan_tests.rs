use fincalc_core::loans::{eligibility, emi, prepayment};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// EMI tests
// ===========================================================================

#[test]
fn test_home_loan_emi() {
    let r = emi::compute_emi(dec!(1_000_000), dec!(8.5), 240);
    assert_eq!(
        r,
        emi::EmiResult {
            monthly_payment: dec!(8_678),
            total_payment: dec!(2_082_776),
            total_interest: dec!(1_082_776),
            principal: dec!(1_000_000),
        }
    );
}

#[test]
fn test_emi_envelope_serializes_decimals_as_strings() {
    let out = emi::calculate_emi(&emi::EmiInput {
        principal: dec!(100_000),
        annual_rate_pct: dec!(12),
        tenure_months: 12,
    });
    let json = serde_json::to_value(&out).unwrap();

    assert_eq!(json["result"]["monthly_payment"], "8885");
    assert_eq!(json["result"]["total_interest"], "6619");
    assert_eq!(json["assumptions"]["tenure_months"], 12);
    assert_eq!(json["metadata"]["precision"], "rust_decimal_128bit");
    assert!(out.warnings.is_empty());
}

#[test]
fn test_emi_input_accepts_numeric_json() {
    let input: emi::EmiInput =
        serde_json::from_str(r#"{"principal": 500000, "annual_rate_pct": 9.0, "tenure_months": 60}"#)
            .unwrap();
    assert_eq!(input.principal, dec!(500_000));
    let r = emi::calculate_emi(&input).result;
    assert!(r.monthly_payment > dec!(10_000) && r.monthly_payment < dec!(10_500));
}

#[test]
fn test_degenerate_emi_warns_and_zeroes() {
    let out = emi::calculate_emi(&emi::EmiInput {
        principal: dec!(100_000),
        annual_rate_pct: dec!(10),
        tenure_months: 0,
    });
    assert_eq!(out.result, emi::EmiResult::zero());
    assert_eq!(out.warnings.len(), 1);
    assert!(out.warnings[0].contains("tenure_months"));
}

// ===========================================================================
// Eligibility tests
// ===========================================================================

#[test]
fn test_eligibility_inverts_emi() {
    let elig = eligibility::compute_eligibility(dec!(100_000), Decimal::ZERO, dec!(9), 20);
    assert_eq!(elig.affordable_emi, dec!(50_000));
    assert_eq!(elig.max_loan_amount, dec!(5_557_248));

    // Borrowing the maximum costs exactly the affordable EMI
    let back = emi::compute_emi(elig.max_loan_amount, dec!(9), 240);
    assert_eq!(back.monthly_payment, elig.affordable_emi);
}

#[test]
fn test_eligibility_existing_emi_reduces_headroom() {
    let without = eligibility::compute_eligibility(dec!(100_000), Decimal::ZERO, dec!(9), 20);
    let with = eligibility::compute_eligibility(dec!(100_000), dec!(20_000), dec!(9), 20);
    assert_eq!(with.affordable_emi, dec!(30_000));
    assert_eq!(with.max_loan_amount, dec!(3_334_349));
    assert!(with.max_loan_amount < without.max_loan_amount);
}

#[test]
fn test_eligibility_exhausted_foir() {
    let out = eligibility::calculate_eligibility(&eligibility::EligibilityInput {
        monthly_income: dec!(60_000),
        existing_emi: dec!(45_000),
        annual_rate_pct: dec!(9),
        tenure_years: 20,
    });
    assert_eq!(out.result.affordable_emi, Decimal::ZERO);
    assert_eq!(out.result.max_loan_amount, Decimal::ZERO);
    assert!(out.warnings[0].contains("50% FOIR"));
}

#[test]
fn test_eligibility_existing_emi_defaults_to_zero() {
    let input: eligibility::EligibilityInput = serde_json::from_str(
        r#"{"monthly_income": "100000", "annual_rate_pct": "9", "tenure_years": 20}"#,
    )
    .unwrap();
    assert_eq!(input.existing_emi, Decimal::ZERO);
    assert_eq!(
        eligibility::calculate_eligibility(&input).result.max_loan_amount,
        dec!(5_557_248)
    );
}

// ===========================================================================
// Prepayment tests
// ===========================================================================

fn home_loan_prepayment() -> prepayment::PrepaymentInput {
    prepayment::PrepaymentInput {
        loan_amount: dec!(2_000_000),
        annual_rate_pct: dec!(9),
        tenure_years: 20,
        prepayment_amount: dec!(200_000),
        prepayment_year: 3,
    }
}

#[test]
fn test_prepayment_original_schedule_matches_emi() {
    let input = home_loan_prepayment();
    let r = prepayment::calculate_prepayment(&input).result;
    let plain = emi::compute_emi(input.loan_amount, input.annual_rate_pct, 240);

    assert_eq!(r.original_emi, plain.monthly_payment);
    assert_eq!(r.original_total_payment, plain.total_payment);
    assert_eq!(r.original_total_interest, plain.total_interest);
}

#[test]
fn test_prepayment_savings_are_consistent() {
    let r = prepayment::calculate_prepayment(&home_loan_prepayment()).result;

    assert_eq!(r.new_outstanding, r.outstanding_before_prepayment - r.prepayment_amount);
    assert_eq!(r.new_tenure_months + r.tenure_reduced_months, 240 - 24);
    assert_eq!(r.new_total_interest, r.new_total_payment - r.original_loan_amount);
    // Savings within a unit of the difference of the rounded interest totals
    let diff = r.original_total_interest - r.new_total_interest;
    assert!((r.interest_saved - diff).abs() <= Decimal::ONE);
}

#[test]
fn test_later_prepayment_saves_less() {
    let early = prepayment::compute_prepayment(dec!(2_000_000), dec!(9), 20, dec!(200_000), 2);
    let late = prepayment::compute_prepayment(dec!(2_000_000), dec!(9), 20, dec!(200_000), 15);
    assert!(early.interest_saved > late.interest_saved);
    assert!(late.interest_saved > Decimal::ZERO);
}

#[test]
fn test_prepayment_envelope_echoes_input() {
    let out = prepayment::calculate_prepayment(&home_loan_prepayment());
    assert_eq!(out.assumptions["prepayment_year"], 3);
    assert_eq!(out.assumptions["loan_amount"], "2000000");
    assert!(out.methodology.contains("tenure re-solved"));
}
