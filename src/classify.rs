//! Delinquency classification of extracted amounts.

use crate::config::RiskThresholds;
use crate::model::{ActionClass, FinancialFields, RiskClassification, RiskStatus};

/// Classifies a unit with the default bucket thresholds.
pub fn classify(fields: &FinancialFields) -> RiskClassification {
    classify_with(fields, &RiskThresholds::default())
}

/// Derives the overdue amount, its age in months of fee, and the matching
/// risk bucket and letter class.
///
/// Without a positive current fee the age is `0.0`, so the unit is reported as
/// up to date whatever its total debt.
pub fn classify_with(fields: &FinancialFields, thresholds: &RiskThresholds) -> RiskClassification {
    let overdue_amount = (fields.total_debt - fields.current_fee).max(0.0);
    let months_overdue = if fields.current_fee > 0.0 {
        round_cents(overdue_amount / fields.current_fee)
    } else {
        0.0
    };

    let (risk_status, action_class) = bucket(months_overdue, thresholds);
    RiskClassification {
        overdue_amount,
        months_overdue,
        risk_status,
        action_class,
    }
}

fn bucket(months: f64, thresholds: &RiskThresholds) -> (RiskStatus, ActionClass) {
    if months <= 0.0 {
        (RiskStatus::AlDia, ActionClass::Ad)
    } else if months <= thresholds.low_max {
        (RiskStatus::MoraBaja, ActionClass::Cs)
    } else if months <= thresholds.moderate_max {
        (RiskStatus::MoraModerada, ActionClass::Cp)
    } else if months < thresholds.high_below {
        (RiskStatus::RiesgoAlto, ActionClass::Ab)
    } else {
        (RiskStatus::Critico, ActionClass::Ab)
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(current_fee: f64, total_debt: f64) -> FinancialFields {
        FinancialFields {
            current_fee,
            total_debt,
            ..FinancialFields::default()
        }
    }

    #[test]
    fn zero_fee_and_debt_is_up_to_date() {
        let result = classify(&fields(0.0, 0.0));
        assert_eq!(result.months_overdue, 0.0);
        assert_eq!(result.risk_status, RiskStatus::AlDia);
        assert_eq!(result.action_class, ActionClass::Ad);
    }

    #[test]
    fn debt_without_fee_short_circuits_to_up_to_date() {
        let result = classify(&fields(0.0, 500_000.0));
        assert_eq!(result.overdue_amount, 500_000.0);
        assert_eq!(result.months_overdue, 0.0);
        assert_eq!(result.risk_status, RiskStatus::AlDia);
    }

    #[test]
    fn two_and_a_quarter_months_is_high_risk() {
        let result = classify(&fields(200_000.0, 650_000.0));
        assert_eq!(result.overdue_amount, 450_000.0);
        assert_eq!(result.months_overdue, 2.25);
        assert_eq!(result.risk_status, RiskStatus::RiesgoAlto);
        assert_eq!(result.action_class, ActionClass::Ab);
    }

    #[test]
    fn overdue_never_negative() {
        let result = classify(&fields(300_000.0, 100_000.0));
        assert_eq!(result.overdue_amount, 0.0);
        assert_eq!(result.risk_status, RiskStatus::AlDia);
    }

    #[test]
    fn bucket_boundaries() {
        let fee = 100_000.0;
        let cases = [
            (fee * 1.5, RiskStatus::MoraBaja, ActionClass::Cs),
            (fee * 2.0, RiskStatus::MoraBaja, ActionClass::Cs),
            (fee * 2.5, RiskStatus::MoraModerada, ActionClass::Cp),
            (fee * 3.0, RiskStatus::MoraModerada, ActionClass::Cp),
            (fee * 3.01, RiskStatus::RiesgoAlto, ActionClass::Ab),
            (fee * 6.99, RiskStatus::RiesgoAlto, ActionClass::Ab),
            (fee * 7.0, RiskStatus::Critico, ActionClass::Ab),
            (fee * 20.0, RiskStatus::Critico, ActionClass::Ab),
        ];

        for (total, status, action) in cases {
            let result = classify(&fields(fee, total));
            assert_eq!(
                (result.risk_status, result.action_class),
                (status, action),
                "total {total} -> {} months",
                result.months_overdue
            );
        }
    }

    #[test]
    fn tiny_overdue_rounds_to_zero_months() {
        let result = classify(&fields(100_000.0, 100_100.0));
        assert_eq!(result.overdue_amount, 100.0);
        assert_eq!(result.months_overdue, 0.0);
        assert_eq!(result.risk_status, RiskStatus::AlDia);
    }

    #[test]
    fn custom_thresholds_move_buckets() {
        let thresholds = RiskThresholds {
            low_max: 1.0,
            moderate_max: 3.0,
            high_below: 6.0,
        };
        let result = classify_with(&fields(100_000.0, 350_000.0), &thresholds);
        assert_eq!(result.months_overdue, 2.5);
        assert_eq!(result.risk_status, RiskStatus::MoraModerada);
    }
}
