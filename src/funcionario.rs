use serde::{Deserialize, Serialize};

fn default_tipo_escala() -> String {
    "DIARISTA".to_string()
}

/// A worker belonging to exactly one escala.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Funcionario {
    pub id: i64,
    pub escala_id: i64,
    pub nome: String,
    pub cargo: String,
    #[serde(default = "default_tipo_escala")]
    pub tipo_escala: String,
    #[serde(default)]
    pub equipe: Option<String>,
    #[serde(default)]
    pub turno_12x36: Option<String>,
    /// Weekly rest days as weekday indices, Sunday = 0.
    #[serde(default)]
    pub folgas_semanais: Option<Vec<u8>>,
}

/// Create/update payload for a funcionário. Updates replace every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncionarioDraft {
    pub escala_id: i64,
    pub nome: String,
    pub cargo: String,
    #[serde(default = "default_tipo_escala")]
    pub tipo_escala: String,
    #[serde(default)]
    pub equipe: Option<String>,
    #[serde(default)]
    pub turno_12x36: Option<String>,
    #[serde(default)]
    pub folgas_semanais: Option<Vec<u8>>,
}

impl FuncionarioDraft {
    pub fn new(escala_id: i64, nome: impl Into<String>, cargo: impl Into<String>) -> Self {
        Self {
            escala_id,
            nome: nome.into(),
            cargo: cargo.into(),
            tipo_escala: default_tipo_escala(),
            equipe: None,
            turno_12x36: None,
            folgas_semanais: None,
        }
    }
}
