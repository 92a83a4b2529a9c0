//! Generic decoding of a PostgreSQL row into a [`Row`], driven by the row's own column metadata.

use crate::value::{Row, Scalar};
use sqlx::postgres::PgRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

pub(crate) fn pg_row_to_row(row: &PgRow) -> Row {
    let mut out = Row::with_capacity(row.len());
    for (idx, col) in row.columns().iter().enumerate() {
        out.push(col.name(), cell_to_scalar(row, idx));
    }
    out
}

fn cell_to_scalar(row: &PgRow, idx: usize) -> Scalar {
    match row.try_get_raw(idx) {
        Ok(raw) if !raw.is_null() => {}
        _ => return Scalar::Null,
    }
    if let Ok(n) = row.try_get::<i16, _>(idx) {
        return Scalar::Int(n.into());
    }
    if let Ok(n) = row.try_get::<i32, _>(idx) {
        return Scalar::Int(n.into());
    }
    if let Ok(n) = row.try_get::<i64, _>(idx) {
        return Scalar::Int(n);
    }
    if let Ok(n) = row.try_get::<f32, _>(idx) {
        return Scalar::Float(n.into());
    }
    if let Ok(n) = row.try_get::<f64, _>(idx) {
        return Scalar::Float(n);
    }
    if let Ok(b) = row.try_get::<bool, _>(idx) {
        return Scalar::Bool(b);
    }
    if let Ok(s) = row.try_get::<String, _>(idx) {
        return Scalar::Text(s);
    }
    if let Ok(b) = row.try_get::<Vec<u8>, _>(idx) {
        return Scalar::Bytes(b);
    }
    if let Ok(u) = row.try_get::<uuid::Uuid, _>(idx) {
        return Scalar::Text(u.to_string());
    }
    if let Ok(d) = row.try_get::<chrono::DateTime<chrono::Utc>, _>(idx) {
        return Scalar::Text(d.to_rfc3339());
    }
    if let Ok(d) = row.try_get::<chrono::NaiveDateTime, _>(idx) {
        return Scalar::Text(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    }
    if let Ok(d) = row.try_get::<chrono::NaiveDate, _>(idx) {
        return Scalar::Text(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(t) = row.try_get::<chrono::NaiveTime, _>(idx) {
        return Scalar::Text(t.format("%H:%M:%S%.f").to_string());
    }
    if let Ok(j) = row.try_get::<serde_json::Value, _>(idx) {
        return Scalar::Text(j.to_string());
    }
    raw_fallback(row, idx)
}

/// Types without a typed decoder: `numeric` is rendered as text, anything else keeps the
/// driver's raw value (text when it reads as printable UTF-8, bytes otherwise).
fn raw_fallback(row: &PgRow, idx: usize) -> Scalar {
    let col = &row.columns()[idx];
    let bytes = match row.try_get_raw(idx).map(|v| v.as_bytes().map(<[u8]>::to_vec)) {
        Ok(Ok(b)) => b,
        _ => {
            tracing::warn!(column = col.name(), pg_type = col.type_info().name(), "unreadable cell, returning null");
            return Scalar::Null;
        }
    };
    if col.type_info().name() == "NUMERIC" {
        if let Some(text) = numeric_text(&bytes) {
            return Scalar::Text(text);
        }
    }
    tracing::debug!(column = col.name(), pg_type = col.type_info().name(), "returning raw cell value");
    match std::str::from_utf8(&bytes) {
        Ok(s) if !s.chars().any(char::is_control) => Scalar::Text(s.to_owned()),
        _ => Scalar::Bytes(bytes),
    }
}

/// Text form of a binary `numeric`: a header of four big-endian words (digit count,
/// weight, sign, display scale) followed by base-10000 digits.
fn numeric_text(buf: &[u8]) -> Option<String> {
    let word = |i: usize| buf.get(i * 2..i * 2 + 2).map(|b| i16::from_be_bytes([b[0], b[1]]));
    let ndigits = usize::try_from(word(0)?).ok()?;
    let weight = i32::from(word(1)?);
    let sign = word(2)? as u16;
    let dscale = usize::try_from(word(3)?).ok()?;
    let digits = (0..ndigits).map(|i| word(4 + i)).collect::<Option<Vec<i16>>>()?;
    match sign {
        0xC000 => return Some("NaN".into()),
        0xD000 => return Some("Infinity".into()),
        0xF000 => return Some("-Infinity".into()),
        _ => {}
    }
    let digit = |i: i32| usize::try_from(i).ok().and_then(|i| digits.get(i).copied()).unwrap_or(0);

    let mut out = String::new();
    if sign == 0x4000 {
        out.push('-');
    }
    if weight < 0 {
        out.push('0');
    }
    for i in 0..=weight {
        if i == 0 {
            out.push_str(&digit(i).to_string());
        } else {
            out.push_str(&format!("{:04}", digit(i)));
        }
    }
    if dscale > 0 {
        let mut frac = String::new();
        let mut i = weight + 1;
        while frac.len() < dscale {
            frac.push_str(&format!("{:04}", digit(i)));
            i += 1;
        }
        frac.truncate(dscale);
        out.push('.');
        out.push_str(&frac);
    }
    Some(out)
}
