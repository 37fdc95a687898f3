//! User-facing feedback text for the credential form.
//!
//! Known provider outcome codes map to specific messages; every other outcome
//! falls through to the generic message of the operation.

#[cfg(test)]
#[path = "messages_test.rs"]
mod messages_test;

use crate::net::gateway::{AuthErrorCode, GatewayError};

/// Minimum password length accepted for sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

pub const PASSWORD_TOO_SHORT: &str = "A senha deve ter pelo menos 6 caracteres.";
pub const SIGN_IN_SUCCESS: &str = "Login realizado com sucesso!";
pub const SIGN_UP_SUCCESS: &str = "Cadastro realizado com sucesso! Faça login para continuar.";
pub const PROFILE_WRITE_FAILED: &str =
    "Conta criada, mas não foi possível salvar seu perfil. Tente novamente mais tarde.";
pub const GENERIC_FAILURE: &str = "Erro ao processar. Verifique as informações e tente novamente.";

pub const PROVIDER_SUCCESS: &str = "Login com Google realizado com sucesso!";
pub const PROVIDER_FAILURE: &str = "Falha no login com Google.";

pub const RESET_EMAIL_REQUIRED: &str = "Informe um email para redefinir a senha.";
pub const RESET_SENT: &str = "Email de redefinição de senha enviado! Verifique sua caixa de entrada.";
pub const RESET_USER_NOT_FOUND: &str = "Usuário não encontrado. Verifique o email digitado.";
pub const RESET_FAILURE: &str = "Não foi possível enviar o email de redefinição. Tente novamente.";

/// Message for a failed sign-in or sign-up.
pub fn credential_error_message(err: &GatewayError) -> &'static str {
    match err.auth_code() {
        Some(AuthErrorCode::EmailAlreadyInUse) => "Este email já está em uso. Por favor, use outro ou faça login.",
        Some(AuthErrorCode::InvalidEmail) => "Email inválido. Verifique e tente novamente.",
        Some(AuthErrorCode::WeakPassword) => "A senha é muito fraca. Use pelo menos 6 caracteres.",
        Some(AuthErrorCode::WrongPassword) => "Senha incorreta. Tente novamente.",
        Some(AuthErrorCode::UserNotFound) => "Usuário não encontrado. Verifique o email ou faça cadastro.",
        Some(AuthErrorCode::Other(_)) | None => GENERIC_FAILURE,
    }
}

/// Message for a failed password-reset request.
pub fn reset_error_message(err: &GatewayError) -> &'static str {
    match err.auth_code() {
        Some(AuthErrorCode::UserNotFound) => RESET_USER_NOT_FOUND,
        _ => RESET_FAILURE,
    }
}
