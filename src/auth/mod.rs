//! Session-cookie authentication: credential storage, validation, and the
//! two-step browser authorization flow.

pub mod credentials;
pub mod error;
pub mod flow;
pub mod session;
pub mod store;
pub mod validator;

pub use credentials::Credentials;
pub use error::AuthError;
pub use flow::{AuthFlow, AuthStatus, ConfirmAuth, SaveCredentials, StartAuth};
pub use session::{AuthSession, AuthSessionRegistry};
pub use store::{CredentialStore, FileCredentialStore};
pub use validator::{GraphqlValidator, ValidateCredentials};
