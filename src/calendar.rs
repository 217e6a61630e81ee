use chrono::{Datelike, NaiveDate};

/// Weekday labels indexed with Sunday at 0. The stored `folgas_semanais`
/// values and the export's weekend highlight both use this convention.
pub const DIAS_SEMANA: [&str; 7] = ["DOM", "SEG", "TER", "QUA", "QUI", "SEX", "SÁB"];

/// Index of Sunday in [`DIAS_SEMANA`].
pub const DOMINGO: usize = 0;

/// Number of days in a civil month, or `None` when the month is out of range.
pub fn days_in_month(ano: i32, mes: u32) -> Option<u32> {
    let primeiro = NaiveDate::from_ymd_opt(ano, mes, 1)?;
    let proximo = if mes == 12 {
        NaiveDate::from_ymd_opt(ano + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(ano, mes + 1, 1)?
    };
    Some((proximo - primeiro).num_days() as u32)
}

/// Weekday of `date` shifted so Sunday is index 0.
pub fn weekday_index(date: NaiveDate) -> usize {
    (date.weekday().number_from_monday() % 7) as usize
}

/// Three-letter weekday label for `date`, per [`DIAS_SEMANA`].
pub fn weekday_label(date: NaiveDate) -> &'static str {
    DIAS_SEMANA[weekday_index(date)]
}
