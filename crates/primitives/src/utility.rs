use validator::ValidationError;

pub const MIN_REASON_LEN: u64 = 10;

const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_MAX_LEN: usize = 128;

pub const EMPLOYMENT_TYPES: &[&str] = &[
    "CLT",
    "PJ",
    "Estagiário",
    "Freelancer",
    "Temporário",
    "Autônomo",
];

const CPF_LEN: usize = 11;
const CNPJ_LEN: usize = 14;
const ZIP_CODE_LEN: usize = 8;

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < PASSWORD_MIN_LEN {
        return Err(ValidationError::new("password_too_short"));
    }
    if len > PASSWORD_MAX_LEN {
        return Err(ValidationError::new("password_too_long"));
    }

    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        return Err(ValidationError::new("password_too_weak"));
    }
    Ok(())
}

pub fn validate_cnpj(cnpj: &str) -> Result<(), ValidationError> {
    validate_digits(cnpj, CNPJ_LEN, "cnpj_invalid")
}

pub fn validate_cpf(cpf: &str) -> Result<(), ValidationError> {
    validate_digits(cpf, CPF_LEN, "cpf_invalid")
}

pub fn validate_zip_code(zip_code: &str) -> Result<(), ValidationError> {
    validate_digits(zip_code, ZIP_CODE_LEN, "zip_code_invalid")
}

pub fn validate_employment_type(value: &str) -> Result<(), ValidationError> {
    if EMPLOYMENT_TYPES.contains(&value) {
        return Ok(());
    }
    Err(ValidationError::new("employment_type_invalid"))
}

/// Whitespace-only text does not count towards a reason's length.
pub fn validate_reason(reason: &str) -> Result<(), ValidationError> {
    if (reason.trim().chars().count() as u64) < MIN_REASON_LEN {
        let mut err = ValidationError::new("reason_too_short");
        err.add_param("min_length".into(), &MIN_REASON_LEN);
        return Err(err);
    }
    Ok(())
}

fn validate_digits(
    value: &str,
    expected_len: usize,
    code: &'static str,
) -> Result<(), ValidationError> {
    if value.len() == expected_len && value.chars().all(|c| c.is_ascii_digit()) {
        return Ok(());
    }

    let mut err = ValidationError::new(code);
    err.add_param("length".into(), &expected_len);
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_needs_letters_and_digits() {
        assert!(validate_password("Segura123").is_ok());
        assert!(validate_password("abc1").is_err());
        assert!(validate_password("somenteletras").is_err());
        assert!(validate_password("1234567890").is_err());
    }

    #[test]
    fn cnpj_must_be_fourteen_digits() {
        assert!(validate_cnpj("12345678000190").is_ok());
        assert!(validate_cnpj("12.345.678/0001-90").is_err());
        assert!(validate_cnpj("1234567800019").is_err());
    }

    #[test]
    fn cpf_and_zip_code_are_digit_only() {
        assert!(validate_cpf("12345678901").is_ok());
        assert!(validate_cpf("1234567890a").is_err());
        assert!(validate_zip_code("01310100").is_ok());
        assert!(validate_zip_code("01310-100").is_err());
    }

    #[test]
    fn employment_type_is_a_closed_list() {
        assert!(validate_employment_type("CLT").is_ok());
        assert!(validate_employment_type("Estagiário").is_ok());
        assert!(validate_employment_type("clt").is_err());
        assert!(validate_employment_type("Voluntário").is_err());
    }

    #[test]
    fn reason_needs_ten_meaningful_characters() {
        assert!(validate_reason("esqueci de bater o ponto").is_ok());
        assert!(validate_reason("curto").is_err());
        assert!(validate_reason("   abc      ").is_err());
    }
}
