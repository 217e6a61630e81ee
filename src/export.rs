//! XLSX rendering of an escala: one column per calendar day, one row per
//! funcionário, cell fills taken from the stored colour legend.

use crate::calendar;
use crate::{Escala, Funcionario, Legenda};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, XlsxError};
use std::collections::BTreeMap;
use std::fmt;

/// Status code meaning unscheduled; never receives a legend fill.
pub const STATUS_SEM_ATRIBUICAO: &str = "-";

/// Status codes rendered in bold white for readability against dark fills.
/// The letters are a legend convention, not schema; no other code gets this.
const STATUS_TEXTO_BRANCO: [&str; 2] = ["M", "R"];

const COR_DESTAQUE_DOMINGO: u32 = 0xFFFF00;
const COR_CABECALHO_DIA: u32 = 0xE0E0E0;

/// The xlsx format caps sheet names at 31 characters.
const MAX_TITULO_ABA: usize = 31;

const LARGURA_COLUNA_NOME: f64 = 25.0;
const LARGURA_COLUNA_CARGO: f64 = 15.0;
const LARGURA_COLUNA_DIA: f64 = 4.0;

#[derive(Debug)]
pub enum ExportError {
    Xlsx(XlsxError),
    InvalidPeriod { mes: u32, ano: i32 },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Xlsx(err) => write!(f, "xlsx error: {err}"),
            ExportError::InvalidPeriod { mes, ano } => {
                write!(f, "no calendar month for mes {mes}, ano {ano}")
            }
        }
    }
}

impl std::error::Error for ExportError {}

impl From<XlsxError> for ExportError {
    fn from(value: XlsxError) -> Self {
        Self::Xlsx(value)
    }
}

/// Suggested download name: `Escala_{nome}_{mes}_{ano}.xlsx`.
pub fn export_filename(escala: &Escala) -> String {
    format!("Escala_{}_{}_{}.xlsx", escala.nome, escala.mes, escala.ano)
}

/// Legend with any leading '#' stripped, ready to use as fill codes.
pub fn sanitize_legenda(legenda: &Legenda) -> BTreeMap<String, String> {
    legenda
        .iter()
        .map(|(status, cor)| (status.clone(), cor.trim_start_matches('#').to_string()))
        .collect()
}

/// Parses a sanitized six-digit hex colour. `None` means the cell is left
/// unfilled; a bad colour never fails the export.
pub fn parse_fill_color(hex: &str) -> Option<u32> {
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// Renders the escala grid as a workbook and serializes it to bytes.
/// `funcionarios` are laid out top to bottom in the order supplied.
pub fn render_xlsx(escala: &Escala, funcionarios: &[Funcionario]) -> Result<Vec<u8>, ExportError> {
    let dias = calendar::days_in_month(escala.ano, escala.mes).ok_or(ExportError::InvalidPeriod {
        mes: escala.mes,
        ano: escala.ano,
    })?;
    let primeiro_dia =
        NaiveDate::from_ymd_opt(escala.ano, escala.mes, 1).ok_or(ExportError::InvalidPeriod {
            mes: escala.mes,
            ano: escala.ano,
        })?;

    let cores = sanitize_legenda(&escala.legenda_cores);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let titulo: String = escala.nome.chars().take(MAX_TITULO_ABA).collect();
    sheet.set_name(titulo)?;

    let negrito = Format::new().set_bold();
    let borda = Format::new().set_border(FormatBorder::Thin);
    let centro = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);
    let cabecalho_domingo = centro
        .clone()
        .set_background_color(COR_DESTAQUE_DOMINGO)
        .set_bold();
    let cabecalho_dia_util = centro.clone().set_background_color(COR_CABECALHO_DIA);

    // Row 0: weekday labels, Sundays highlighted. Row 1: day numbers.
    sheet.write_with_format(0, 0, "Funcionário", &negrito)?;
    sheet.write_with_format(0, 1, "Cargo", &negrito)?;
    for (offset, data) in primeiro_dia.iter_days().take(dias as usize).enumerate() {
        let dia = offset as u32 + 1;
        let col = (1 + dia) as u16;
        let formato = if calendar::weekday_index(data) == calendar::DOMINGO {
            &cabecalho_domingo
        } else {
            &cabecalho_dia_util
        };
        sheet.write_with_format(0, col, calendar::weekday_label(data), formato)?;
        sheet.write_with_format(1, col, dia, &centro)?;
    }

    for (linha, func) in funcionarios.iter().enumerate() {
        let row = (linha + 2) as u32;
        sheet.write_with_format(row, 0, &func.nome, &borda)?;
        sheet.write_with_format(row, 1, &func.cargo, &borda)?;

        let dias_do_func = escala.dados_escala.get(&func.id.to_string());
        for dia in 1..=dias {
            let col = (1 + dia) as u16;
            let status = dias_do_func
                .and_then(|d| d.get(&dia.to_string()))
                .map(String::as_str)
                .unwrap_or(STATUS_SEM_ATRIBUICAO);

            let mut formato = centro.clone();
            if status != STATUS_SEM_ATRIBUICAO {
                if let Some(cor) = cores.get(status).and_then(|hex| parse_fill_color(hex)) {
                    formato = formato.set_background_color(cor);
                    if STATUS_TEXTO_BRANCO.contains(&status) {
                        formato = formato.set_bold().set_font_color(0xFFFFFF);
                    }
                }
            }
            sheet.write_with_format(row, col, status, &formato)?;
        }
    }

    sheet.set_column_width(0, LARGURA_COLUNA_NOME)?;
    sheet.set_column_width(1, LARGURA_COLUNA_CARGO)?;
    for dia in 1..=dias {
        sheet.set_column_width((1 + dia) as u16, LARGURA_COLUNA_DIA)?;
    }

    Ok(workbook.save_to_buffer()?)
}
