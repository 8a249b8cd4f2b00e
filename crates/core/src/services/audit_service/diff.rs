use super::fields::display_name;
use chronos_primitives::models::field_value::FieldValue;

pub const NOT_SET: &str = "Não definido";

pub fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Null => NOT_SET.to_string(),
        FieldValue::Text(s) => s.clone(),
        FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
            (*n as i64).to_string()
        }
        FieldValue::Number(n) => n.to_string(),
        FieldValue::Bool(true) => "Sim".to_string(),
        FieldValue::Bool(false) => "Não".to_string(),
        FieldValue::Date(d) => d.format("%d/%m/%Y").to_string(),
    }
}

/// `"<label>: <old> → <new>"`
pub fn generate_diff(field_name: &str, old: &FieldValue, new: &FieldValue) -> String {
    format!(
        "{}: {} → {}",
        display_name(field_name),
        format_value(old),
        format_value(new)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn salary_diff_has_no_trailing_zero() {
        let diff = generate_diff("salary", &3000.0.into(), &3500.0.into());
        assert_eq!(diff, "Salário: 3000 → 3500");
    }

    #[test]
    fn booleans_and_nulls_are_humanized() {
        assert_eq!(
            generate_diff("is_active", &true.into(), &false.into()),
            "Ativo: Sim → Não"
        );
        assert_eq!(
            generate_diff("position", &FieldValue::Null, &"Analista".into()),
            "Cargo: Não definido → Analista"
        );
    }

    #[test]
    fn dates_use_day_month_year() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_value(&d.into()), "01/03/2024");
        assert_eq!(format_value(&1234.5.into()), "1234.5");
    }
}
