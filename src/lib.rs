pub mod calendar;
pub mod continuity;
pub mod escala;
pub mod export;
pub mod funcionario;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod persistence;

pub use escala::{Escala, EscalaDraft, Grade, Legenda};
pub use export::{ExportError, export_filename, render_xlsx, sanitize_legenda};
pub use funcionario::{Funcionario, FuncionarioDraft};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteEscalaStore;
pub use persistence::{EscalaStore, PersistenceError, PersistenceResult};
