use crate::{Escala, EscalaDraft, Funcionario, FuncionarioDraft};
use serde_json::Error as SerdeJsonError;
use std::fmt;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    NotFound,
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::NotFound => write!(f, "record not found"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Storage contract for escalas and their funcionários. An escala owns its
/// funcionários: deleting it must remove them atomically.
pub trait EscalaStore: Send + Sync {
    fn create_escala(&self, draft: &EscalaDraft) -> PersistenceResult<Escala>;
    fn get_escala(&self, id: i64) -> PersistenceResult<Option<Escala>>;
    /// All escalas, newest period first (ano descending, then mes descending).
    fn list_escalas(&self) -> PersistenceResult<Vec<Escala>>;
    /// Replaces every field, grid and legend included. `NotFound` when absent.
    fn update_escala(&self, id: i64, draft: &EscalaDraft) -> PersistenceResult<Escala>;
    /// Deletes the escala and, by cascade, its funcionários. Returns whether
    /// anything was removed.
    fn delete_escala(&self, id: i64) -> PersistenceResult<bool>;
    /// Continues `origem_id` into the given period: new escala with the same
    /// roster and legend, empty grid. Runs as a single unit of work, rolling
    /// back entirely on failure. `NotFound` when the source does not exist.
    fn duplicate_escala(
        &self,
        origem_id: i64,
        novo_mes: u32,
        novo_ano: i32,
    ) -> PersistenceResult<(Escala, Vec<Funcionario>)>;

    /// Funcionários owned by one escala, in id order.
    fn funcionarios_por_escala(&self, escala_id: i64) -> PersistenceResult<Vec<Funcionario>>;
    fn get_funcionario(&self, id: i64) -> PersistenceResult<Option<Funcionario>>;
    fn create_funcionario(&self, draft: &FuncionarioDraft) -> PersistenceResult<Funcionario>;
    fn update_funcionario(&self, id: i64, draft: &FuncionarioDraft)
    -> PersistenceResult<Funcionario>;
    fn delete_funcionario(&self, id: i64) -> PersistenceResult<bool>;
}

#[cfg(feature = "sqlite")]
pub mod sqlite;
