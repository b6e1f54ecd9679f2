//! konto-auth – Auth-Kern des Konto-Service
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id (ausgelagert auf den Blocking-Pool)
//! - Signierte, zeitlich begrenzte Tokens (JWT, HS256)
//! - KontoService (Registrierung, Login, Profil, Aenderung, Loeschung)
//!   inklusive der Besitz- und Admin-Regeln

pub mod error;
pub mod models;
pub mod password;
pub mod service;
pub mod token;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult};
pub use models::{Anmeldung, KontoProfil, ProfilAenderung};
pub use password::{HashKonfig, PasswortHasher};
pub use service::KontoService;
pub use token::{TokenService, TokenUngueltig, STANDARD_LEBENSDAUER};
