#![cfg(feature = "sqlite")]

use escala_tool::{
    EscalaDraft, EscalaStore, FuncionarioDraft, Grade, Legenda, PersistenceError,
    SqliteEscalaStore,
};
use tempfile::NamedTempFile;

fn new_store() -> (NamedTempFile, SqliteEscalaStore) {
    let file = NamedTempFile::new().unwrap();
    let store = SqliteEscalaStore::new(file.path()).unwrap();
    (file, store)
}

fn draft_with_data(nome: &str, mes: u32, ano: i32) -> EscalaDraft {
    let mut draft = EscalaDraft::new(nome, mes, ano);
    draft
        .dados_escala
        .entry("7".to_string())
        .or_default()
        .insert("15".to_string(), "FG".to_string());
    draft
        .legenda_cores
        .insert("FG".to_string(), "#FF0000".to_string());
    draft
        .legenda_cores
        .insert("M".to_string(), "#1F4E78".to_string());
    draft
}

#[test]
fn create_and_get_round_trip_grid_and_legend() {
    let (_file, store) = new_store();
    let draft = draft_with_data("Escala Bezerros", 1, 2025);

    let escala = store.create_escala(&draft).unwrap();
    let loaded = store.get_escala(escala.id).unwrap().unwrap();

    assert_eq!(loaded.nome, "Escala Bezerros");
    assert_eq!(loaded.mes, 1);
    assert_eq!(loaded.ano, 2025);
    assert_eq!(loaded.dados_escala, draft.dados_escala);
    assert_eq!(loaded.legenda_cores, draft.legenda_cores);
}

#[test]
fn list_orders_newest_period_first() {
    let (_file, store) = new_store();
    store
        .create_escala(&EscalaDraft::new("Dezembro", 12, 2024))
        .unwrap();
    store
        .create_escala(&EscalaDraft::new("Janeiro", 1, 2025))
        .unwrap();
    store
        .create_escala(&EscalaDraft::new("Maio", 5, 2024))
        .unwrap();

    let escalas = store.list_escalas().unwrap();
    let periodos: Vec<(i32, u32)> = escalas.iter().map(|e| (e.ano, e.mes)).collect();
    assert_eq!(periodos, vec![(2025, 1), (2024, 12), (2024, 5)]);
}

#[test]
fn update_replaces_grid_and_legend_wholesale() {
    let (_file, store) = new_store();
    let escala = store
        .create_escala(&draft_with_data("Escala Bezerros", 1, 2025))
        .unwrap();

    let mut replacement = EscalaDraft::new("Escala Bezerros", 1, 2025);
    replacement
        .dados_escala
        .entry("9".to_string())
        .or_default()
        .insert("2".to_string(), "M".to_string());
    replacement
        .legenda_cores
        .insert("M".to_string(), "#000080".to_string());

    let updated = store.update_escala(escala.id, &replacement).unwrap();

    // Full replace: the old employee-7 entry and the FG legend key are gone.
    assert_eq!(updated.dados_escala, replacement.dados_escala);
    assert_eq!(updated.legenda_cores, replacement.legenda_cores);
    assert!(!updated.dados_escala.contains_key("7"));

    let loaded = store.get_escala(escala.id).unwrap().unwrap();
    assert_eq!(loaded.dados_escala, replacement.dados_escala);
    assert_eq!(loaded.legenda_cores, replacement.legenda_cores);
}

#[test]
fn update_missing_escala_is_not_found() {
    let (_file, store) = new_store();
    let result = store.update_escala(999, &EscalaDraft::new("Fantasma", 1, 2025));
    assert!(matches!(result, Err(PersistenceError::NotFound)));
}

#[test]
fn delete_escala_cascades_to_funcionarios() {
    let (_file, store) = new_store();
    let escala = store
        .create_escala(&EscalaDraft::new("Escala Bezerros", 1, 2025))
        .unwrap();
    let func = store
        .create_funcionario(&FuncionarioDraft::new(escala.id, "Ana Souza", "Gerente"))
        .unwrap();
    store
        .create_funcionario(&FuncionarioDraft::new(escala.id, "Bruno Lima", "Vigia"))
        .unwrap();

    assert!(store.delete_escala(escala.id).unwrap());

    assert!(store.get_escala(escala.id).unwrap().is_none());
    assert!(store.funcionarios_por_escala(escala.id).unwrap().is_empty());
    assert!(store.get_funcionario(func.id).unwrap().is_none());

    // Second delete finds nothing.
    assert!(!store.delete_escala(escala.id).unwrap());
}

#[test]
fn funcionario_crud_full_replace() {
    let (_file, store) = new_store();
    let escala = store
        .create_escala(&EscalaDraft::new("Escala Bezerros", 1, 2025))
        .unwrap();

    let mut draft = FuncionarioDraft::new(escala.id, "Ana Souza", "Gerente");
    draft.equipe = Some("Equipe A".to_string());
    draft.folgas_semanais = Some(vec![0, 3]);
    let func = store.create_funcionario(&draft).unwrap();
    assert_eq!(func.tipo_escala, "DIARISTA");
    assert_eq!(func.folgas_semanais, Some(vec![0, 3]));

    let mut replacement = FuncionarioDraft::new(escala.id, "Ana Souza", "Supervisora");
    replacement.tipo_escala = "12x36".to_string();
    replacement.turno_12x36 = Some("IMPAR".to_string());
    let updated = store.update_funcionario(func.id, &replacement).unwrap();

    assert_eq!(updated.cargo, "Supervisora");
    assert_eq!(updated.tipo_escala, "12x36");
    assert_eq!(updated.turno_12x36, Some("IMPAR".to_string()));
    // Full replace clears fields absent from the draft.
    assert_eq!(updated.equipe, None);
    assert_eq!(updated.folgas_semanais, None);

    assert!(store.delete_funcionario(func.id).unwrap());
    assert!(!store.delete_funcionario(func.id).unwrap());
    assert!(
        matches!(store.update_funcionario(func.id, &replacement), Err(PersistenceError::NotFound))
    );
}

#[test]
fn duplicate_copies_roster_and_legend_into_empty_period() {
    let (_file, store) = new_store();
    let origem = store
        .create_escala(&draft_with_data("Escala Bezerros", 1, 2025))
        .unwrap();

    let mut ana = FuncionarioDraft::new(origem.id, "Ana Souza", "Gerente");
    ana.equipe = Some("Equipe A".to_string());
    ana.folgas_semanais = Some(vec![0]);
    store.create_funcionario(&ana).unwrap();
    let mut bruno = FuncionarioDraft::new(origem.id, "Bruno Lima", "Vigia");
    bruno.tipo_escala = "12x36".to_string();
    bruno.turno_12x36 = Some("PAR".to_string());
    store.create_funcionario(&bruno).unwrap();

    let (nova, copiados) = store.duplicate_escala(origem.id, 2, 2025).unwrap();

    assert_eq!(nova.nome, "Escala Bezerros (Cópia)");
    assert_eq!(nova.mes, 2);
    assert_eq!(nova.ano, 2025);
    assert!(nova.dados_escala.is_empty());
    assert_eq!(nova.legenda_cores, origem.legenda_cores);
    assert_ne!(nova.id, origem.id);

    assert_eq!(copiados.len(), 2);
    for copia in &copiados {
        assert_eq!(copia.escala_id, nova.id);
    }
    assert_eq!(copiados[0].nome, "Ana Souza");
    assert_eq!(copiados[0].equipe, Some("Equipe A".to_string()));
    assert_eq!(copiados[0].folgas_semanais, Some(vec![0]));
    assert_eq!(copiados[1].nome, "Bruno Lima");
    assert_eq!(copiados[1].tipo_escala, "12x36");
    assert_eq!(copiados[1].turno_12x36, Some("PAR".to_string()));

    // Source escala and roster are untouched.
    let origem_depois = store.get_escala(origem.id).unwrap().unwrap();
    assert_eq!(origem_depois, origem);
    assert_eq!(store.funcionarios_por_escala(origem.id).unwrap().len(), 2);
}

#[test]
fn duplicated_legend_is_independent_of_the_source() {
    let (_file, store) = new_store();
    let origem = store
        .create_escala(&draft_with_data("Escala Bezerros", 1, 2025))
        .unwrap();
    let (nova, _) = store.duplicate_escala(origem.id, 2, 2025).unwrap();

    let mut edit = EscalaDraft {
        nome: nova.nome.clone(),
        mes: nova.mes,
        ano: nova.ano,
        dados_escala: Grade::new(),
        legenda_cores: Legenda::new(),
    };
    edit.legenda_cores
        .insert("FG".to_string(), "#00FF00".to_string());
    store.update_escala(nova.id, &edit).unwrap();

    let origem_depois = store.get_escala(origem.id).unwrap().unwrap();
    assert_eq!(origem_depois.legenda_cores.get("FG").unwrap(), "#FF0000");
}

#[test]
fn duplicate_missing_source_creates_nothing() {
    let (_file, store) = new_store();
    store
        .create_escala(&EscalaDraft::new("Escala Bezerros", 1, 2025))
        .unwrap();

    let result = store.duplicate_escala(999, 2, 2025);
    assert!(matches!(result, Err(PersistenceError::NotFound)));
    assert_eq!(store.list_escalas().unwrap().len(), 1);
}
