//! Continuation of an escala into a new period: the new record reuses the
//! roster and colour legend but starts with an empty grid. The persistence
//! layer wraps these builders in a single transaction.

use crate::{Escala, EscalaDraft, Funcionario, FuncionarioDraft, Grade};

/// Suffix appended to the continued escala's name; the user renames it later.
pub const SUFIXO_COPIA: &str = " (Cópia)";

/// Draft for the new-period escala: target month/year, an independent copy of
/// the source legend, and an empty grid. Month/year range checks are the
/// caller's concern.
pub fn continuation(origem: &Escala, novo_mes: u32, novo_ano: i32) -> EscalaDraft {
    EscalaDraft {
        nome: format!("{}{}", origem.nome, SUFIXO_COPIA),
        mes: novo_mes,
        ano: novo_ano,
        dados_escala: Grade::new(),
        legenda_cores: origem.legenda_cores.clone(),
    }
}

/// Drafts re-attaching every source funcionário to the new escala. All fields
/// are value copies; day assignments are never carried over.
pub fn roster_copy(funcionarios: &[Funcionario], nova_escala_id: i64) -> Vec<FuncionarioDraft> {
    funcionarios
        .iter()
        .map(|func| FuncionarioDraft {
            escala_id: nova_escala_id,
            nome: func.nome.clone(),
            cargo: func.cargo.clone(),
            tipo_escala: func.tipo_escala.clone(),
            equipe: func.equipe.clone(),
            turno_12x36: func.turno_12x36.clone(),
            folgas_semanais: func.folgas_semanais.clone(),
        })
        .collect()
}
