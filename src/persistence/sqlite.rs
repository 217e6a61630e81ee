use super::{EscalaStore, PersistenceError, PersistenceResult};
use crate::{Escala, EscalaDraft, Funcionario, FuncionarioDraft, continuity};
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

pub struct SqliteEscalaStore {
    connection: Mutex<Connection>,
}

impl SqliteEscalaStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        let connection = Connection::open_in_memory()?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            PRAGMA foreign_keys = ON;
            CREATE TABLE IF NOT EXISTS escalas (
                id INTEGER PRIMARY KEY,
                nome TEXT NOT NULL,
                mes INTEGER NOT NULL,
                ano INTEGER NOT NULL,
                dados_escala TEXT NOT NULL,
                legenda_cores TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS funcionarios (
                id INTEGER PRIMARY KEY,
                escala_id INTEGER NOT NULL REFERENCES escalas(id) ON DELETE CASCADE,
                nome TEXT NOT NULL,
                cargo TEXT NOT NULL,
                tipo_escala TEXT NOT NULL DEFAULT 'DIARISTA',
                equipe TEXT,
                turno_12x36 TEXT,
                folgas_semanais TEXT
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }
}

fn insert_escala(conn: &Connection, draft: &EscalaDraft) -> PersistenceResult<i64> {
    let dados = serde_json::to_string(&draft.dados_escala)?;
    let legenda = serde_json::to_string(&draft.legenda_cores)?;
    conn.execute(
        "INSERT INTO escalas (nome, mes, ano, dados_escala, legenda_cores)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![draft.nome, draft.mes, draft.ano, dados, legenda],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_funcionario(conn: &Connection, draft: &FuncionarioDraft) -> PersistenceResult<i64> {
    let folgas = draft
        .folgas_semanais
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    conn.execute(
        "INSERT INTO funcionarios (escala_id, nome, cargo, tipo_escala, equipe, turno_12x36, folgas_semanais)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            draft.escala_id,
            draft.nome,
            draft.cargo,
            draft.tipo_escala,
            draft.equipe,
            draft.turno_12x36,
            folgas,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

type EscalaRow = (i64, String, u32, i32, String, String);

fn escala_from_row(row: EscalaRow) -> PersistenceResult<Escala> {
    let (id, nome, mes, ano, dados_json, legenda_json) = row;
    Ok(Escala {
        id,
        nome,
        mes,
        ano,
        dados_escala: serde_json::from_str(&dados_json)?,
        legenda_cores: serde_json::from_str(&legenda_json)?,
    })
}

type FuncionarioRow = (
    i64,
    i64,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
);

fn funcionario_from_row(row: FuncionarioRow) -> PersistenceResult<Funcionario> {
    let (id, escala_id, nome, cargo, tipo_escala, equipe, turno_12x36, folgas_json) = row;
    let folgas_semanais = folgas_json
        .map(|json| serde_json::from_str(&json))
        .transpose()?;
    Ok(Funcionario {
        id,
        escala_id,
        nome,
        cargo,
        tipo_escala,
        equipe,
        turno_12x36,
        folgas_semanais,
    })
}

fn load_escala(conn: &Connection, id: i64) -> PersistenceResult<Option<Escala>> {
    let mut stmt = conn.prepare(
        "SELECT id, nome, mes, ano, dados_escala, legenda_cores FROM escalas WHERE id = ?1",
    )?;
    let row: Option<EscalaRow> = stmt
        .query_row(params![id], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
            ))
        })
        .optional()?;
    row.map(escala_from_row).transpose()
}

fn load_funcionarios(conn: &Connection, escala_id: i64) -> PersistenceResult<Vec<Funcionario>> {
    let mut stmt = conn.prepare(
        "SELECT id, escala_id, nome, cargo, tipo_escala, equipe, turno_12x36, folgas_semanais
         FROM funcionarios WHERE escala_id = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map(params![escala_id], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
            row.get(7)?,
        ))
    })?;

    let mut funcionarios = Vec::new();
    for row in rows {
        funcionarios.push(funcionario_from_row(row?)?);
    }
    Ok(funcionarios)
}

fn load_funcionario(conn: &Connection, id: i64) -> PersistenceResult<Option<Funcionario>> {
    let mut stmt = conn.prepare(
        "SELECT id, escala_id, nome, cargo, tipo_escala, equipe, turno_12x36, folgas_semanais
         FROM funcionarios WHERE id = ?1",
    )?;
    let row: Option<FuncionarioRow> = stmt
        .query_row(params![id], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
            ))
        })
        .optional()?;
    row.map(funcionario_from_row).transpose()
}

impl EscalaStore for SqliteEscalaStore {
    fn create_escala(&self, draft: &EscalaDraft) -> PersistenceResult<Escala> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let id = insert_escala(&conn, draft)?;
        load_escala(&conn, id)?.ok_or(PersistenceError::NotFound)
    }

    fn get_escala(&self, id: i64) -> PersistenceResult<Option<Escala>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        load_escala(&conn, id)
    }

    fn list_escalas(&self) -> PersistenceResult<Vec<Escala>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, nome, mes, ano, dados_escala, legenda_cores
             FROM escalas ORDER BY ano DESC, mes DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
            ))
        })?;

        let mut escalas = Vec::new();
        for row in rows {
            escalas.push(escala_from_row(row?)?);
        }
        Ok(escalas)
    }

    fn update_escala(&self, id: i64, draft: &EscalaDraft) -> PersistenceResult<Escala> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let dados = serde_json::to_string(&draft.dados_escala)?;
        let legenda = serde_json::to_string(&draft.legenda_cores)?;
        let changed = conn.execute(
            "UPDATE escalas SET nome = ?1, mes = ?2, ano = ?3, dados_escala = ?4, legenda_cores = ?5
             WHERE id = ?6",
            params![draft.nome, draft.mes, draft.ano, dados, legenda, id],
        )?;
        if changed == 0 {
            return Err(PersistenceError::NotFound);
        }
        load_escala(&conn, id)?.ok_or(PersistenceError::NotFound)
    }

    fn delete_escala(&self, id: i64) -> PersistenceResult<bool> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let removed = conn.execute("DELETE FROM escalas WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    fn duplicate_escala(
        &self,
        origem_id: i64,
        novo_mes: u32,
        novo_ano: i32,
    ) -> PersistenceResult<(Escala, Vec<Funcionario>)> {
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;

        let Some(origem) = load_escala(&tx, origem_id)? else {
            return Err(PersistenceError::NotFound);
        };
        let elenco = load_funcionarios(&tx, origem_id)?;

        let nova_id = insert_escala(&tx, &continuity::continuation(&origem, novo_mes, novo_ano))?;
        for copia in continuity::roster_copy(&elenco, nova_id) {
            insert_funcionario(&tx, &copia)?;
        }

        let nova = load_escala(&tx, nova_id)?.ok_or(PersistenceError::NotFound)?;
        let funcionarios = load_funcionarios(&tx, nova_id)?;
        tx.commit()?;
        Ok((nova, funcionarios))
    }

    fn funcionarios_por_escala(&self, escala_id: i64) -> PersistenceResult<Vec<Funcionario>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        load_funcionarios(&conn, escala_id)
    }

    fn get_funcionario(&self, id: i64) -> PersistenceResult<Option<Funcionario>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        load_funcionario(&conn, id)
    }

    fn create_funcionario(&self, draft: &FuncionarioDraft) -> PersistenceResult<Funcionario> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let id = insert_funcionario(&conn, draft)?;
        load_funcionario(&conn, id)?.ok_or(PersistenceError::NotFound)
    }

    fn update_funcionario(
        &self,
        id: i64,
        draft: &FuncionarioDraft,
    ) -> PersistenceResult<Funcionario> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let folgas = draft
            .folgas_semanais
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let changed = conn.execute(
            "UPDATE funcionarios
             SET escala_id = ?1, nome = ?2, cargo = ?3, tipo_escala = ?4,
                 equipe = ?5, turno_12x36 = ?6, folgas_semanais = ?7
             WHERE id = ?8",
            params![
                draft.escala_id,
                draft.nome,
                draft.cargo,
                draft.tipo_escala,
                draft.equipe,
                draft.turno_12x36,
                folgas,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(PersistenceError::NotFound);
        }
        load_funcionario(&conn, id)?.ok_or(PersistenceError::NotFound)
    }

    fn delete_funcionario(&self, id: i64) -> PersistenceResult<bool> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let removed = conn.execute("DELETE FROM funcionarios WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}
