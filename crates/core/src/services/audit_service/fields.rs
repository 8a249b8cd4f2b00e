use chronos_primitives::models::dtos::audit_dto::AvailableField;

/// Never recorded, whatever the company configuration says.
pub const EXCLUDED_FIELDS: &[&str] = &[
    "password",
    "password_hash",
    "refresh_token",
    "reset_password_token",
    "reset_password_expires",
    "updated_at",
];

/// Tracked when a company has no configuration of its own.
pub const DEFAULT_TRACKED_FIELDS: &[&str] = &[
    "salary",
    "position",
    "department",
    "is_active",
    "is_approved",
    "role",
    "hire_date",
    "employment_type",
    "work_schedule",
];

const fn field(value: &'static str, label: &'static str) -> AvailableField {
    AvailableField { value, label }
}

/// Every auditable user attribute with its Portuguese label.
pub const AVAILABLE_FIELDS: &[AvailableField] = &[
    field("name", "Nome"),
    field("email", "E-mail"),
    field("cpf", "CPF"),
    field("birth_date", "Data de Nascimento"),
    field("phone", "Telefone"),
    field("mobile_phone", "Celular"),
    field("address", "Endereço"),
    field("city", "Cidade"),
    field("state", "Estado"),
    field("zip_code", "CEP"),
    field("employee_id", "Matrícula"),
    field("department", "Departamento"),
    field("position", "Cargo"),
    field("hire_date", "Data de Admissão"),
    field("salary", "Salário"),
    field("work_schedule", "Horário de Trabalho"),
    field("employment_type", "Tipo de Vínculo"),
    field("direct_supervisor", "Supervisor Direto"),
    field("bank_name", "Banco"),
    field("bank_account", "Conta Bancária"),
    field("pix", "Chave PIX"),
    field("notes", "Observações"),
    field("profile_photo", "Foto de Perfil"),
    field("role", "Função"),
    field("is_active", "Ativo"),
    field("is_approved", "Aprovado"),
];

pub fn display_name(field_name: &str) -> &str {
    AVAILABLE_FIELDS
        .iter()
        .find(|f| f.value == field_name)
        .map(|f| f.label)
        .unwrap_or(field_name)
}

pub fn is_excluded(field_name: &str) -> bool {
    EXCLUDED_FIELDS.contains(&field_name)
}

pub fn is_available(field_name: &str) -> bool {
    AVAILABLE_FIELDS.iter().any(|f| f.value == field_name)
}

pub fn should_track_field(field_name: &str, tracked_fields: &[String]) -> bool {
    !is_excluded(field_name) && tracked_fields.iter().any(|f| f == field_name)
}

pub fn default_tracked_fields() -> Vec<String> {
    DEFAULT_TRACKED_FIELDS.iter().map(|f| f.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_names_fall_back_to_raw() {
        assert_eq!(display_name("salary"), "Salário");
        assert_eq!(display_name("shoe_size"), "shoe_size");
    }

    #[test]
    fn excluded_fields_win_over_configuration() {
        let tracked = vec!["password".to_string(), "salary".to_string()];
        assert!(!should_track_field("password", &tracked));
        assert!(should_track_field("salary", &tracked));
        assert!(!should_track_field("department", &tracked));
    }

    #[test]
    fn defaults_are_all_available_and_not_excluded() {
        for f in DEFAULT_TRACKED_FIELDS {
            assert!(is_available(f), "{f} missing from catalog");
            assert!(!is_excluded(f));
        }
        assert!(AVAILABLE_FIELDS.iter().all(|f| !is_excluded(f.value)));
    }
}
