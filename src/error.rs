//! Frontend Errors
//!
//! Every failure here returns the UI to a stable, re-editable state; none is fatal.

use std::fmt;

/// A submit-time rule the user broke. One is reported at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingCategory,
    MissingImage,
    EmptyName,
    ZeroPrice,
    EmptyDescription,
    ImageNotAnImage,
    ImageTooLarge,
}

impl ValidationError {
    /// Name of the offending form field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingCategory => "category",
            ValidationError::MissingImage
            | ValidationError::ImageNotAnImage
            | ValidationError::ImageTooLarge => "image",
            ValidationError::EmptyName => "name",
            ValidationError::ZeroPrice => "price",
            ValidationError::EmptyDescription => "description",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationError::MissingCategory => "Selecione uma categoria",
            ValidationError::MissingImage => "Adicione uma foto do prato",
            ValidationError::EmptyName => "Informe o nome do prato",
            ValidationError::ZeroPrice => "Informe o preço do prato",
            ValidationError::EmptyDescription => "Informe a descrição do prato",
            ValidationError::ImageNotAnImage => "O arquivo precisa ser uma imagem",
            ValidationError::ImageTooLarge => "Tamanho máximo da foto: 10mb",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ValidationError {}

/// Application-level errors surfaced to the user as a toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Validation(ValidationError),
    /// Remote create/update/delete failed
    Store(String),
    /// Image upload failed
    Storage(String),
    /// Target id vanished from the list; never shown to the user
    NotFound(String),
}

impl AppError {
    /// Whether this error should be shown to the user
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, AppError::NotFound(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "{}", e),
            AppError::Store(msg) => write!(f, "Não foi possível salvar: {}", msg),
            AppError::Storage(msg) => write!(f, "Falha no envio da foto: {}", msg),
            AppError::NotFound(id) => write!(f, "Prato {} não encontrado", id),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

pub type AppResult<T> = Result<T, AppError>;
