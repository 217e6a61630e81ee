use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Day-by-day assignments: employee id (as text) -> day of month (as text,
/// "1".."31") -> status code. Missing entries mean unscheduled ("-").
pub type Grade = BTreeMap<String, BTreeMap<String, String>>;

/// Colour legend: status code -> hex RGB colour, with or without a leading '#'.
pub type Legenda = BTreeMap<String, String>;

/// A work-schedule grid for one month/year at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Escala {
    pub id: i64,
    pub nome: String,
    pub mes: u32,
    pub ano: i32,
    #[serde(default)]
    pub dados_escala: Grade,
    #[serde(default)]
    pub legenda_cores: Legenda,
}

/// Create/update payload for an escala. Saving replaces the grid and legend
/// wholesale; there is no day-level update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalaDraft {
    pub nome: String,
    pub mes: u32,
    pub ano: i32,
    #[serde(default)]
    pub dados_escala: Grade,
    #[serde(default)]
    pub legenda_cores: Legenda,
}

impl EscalaDraft {
    pub fn new(nome: impl Into<String>, mes: u32, ano: i32) -> Self {
        Self {
            nome: nome.into(),
            mes,
            ano,
            dados_escala: Grade::new(),
            legenda_cores: Legenda::new(),
        }
    }
}

impl Escala {
    /// Status code stored for an employee on a given day, "-" when absent.
    pub fn status_de(&self, funcionario_id: i64, dia: u32) -> &str {
        self.dados_escala
            .get(&funcionario_id.to_string())
            .and_then(|dias| dias.get(&dia.to_string()))
            .map(String::as_str)
            .unwrap_or("-")
    }
}
