//! Shared constants: default endpoint, route names, and user-facing messages.

/// Base URL of the notification API when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Route segment of the notification collection, relative to the API base.
pub const NOTIFICATIONS_PATH: &str = "dengue-notifications";

/// Route segment of the user collection, relative to the API base.
pub const USERS_PATH: &str = "users";

/// Health probe path, relative to the API base (the probe lives beside `/api`).
pub const HEALTH_PATH: &str = "../health";

pub const MSG_API_CONNECTED: &str = "Conectado à API com sucesso!";
pub const MSG_API_UNREACHABLE: &str =
    "Erro ao conectar com a API. Verifique se o servidor está rodando.";
pub const MSG_SUBMIT_OK: &str = "Notificação de dengue enviada com sucesso!";
pub const MSG_SUBMIT_FAILED: &str = "Erro ao enviar notificação. Tente novamente.";
pub const MSG_REQUIRED_MISSING: &str = "Por favor, preencha todos os campos obrigatórios.";
pub const MSG_FORM_CLEARED: &str = "Formulário limpo com sucesso!";
