//! Pattern tables for vale and payment-order fields.
//!
//! Each table is one field's cascade, most specific first. Labels are
//! separated from values by `[ \t]*` so a capture never runs onto the
//! next line unless the pattern asks for it.

// Shared shapes

const FECHA: &[&str] = &[
    r"(?i)\bfecha(?:[ \t]+de[ \t]+(?:emisi[oó]n|elaboraci[oó]n|pago))?[ \t]*:?[ \t]*(\d{1,2}/\d{1,2}/\d{4})",
    r"\b(\d{1,2}/\d{1,2}/\d{4})\b",
];

const PROVEEDOR: &[&str] = &[
    r"(?i)\bproveedor[ \t]*:[ \t]*([^\n]+)",
    r"(?i)\bbeneficiario[ \t]*:[ \t]*([^\n]+)",
    r"(?i)\bproveedor[ \t]*\n[ \t]*([^\n]+)",
    r"(?i)\bpagar[ \t]+a[ \t]*:?[ \t]*([^\n]+)",
];

const RFC: &[&str] = &[
    r"(?i)\bR\.?F\.?C\.?[ \t]*:?[ \t]*([A-ZÑ&]{3,4}\d{6}[A-Z0-9]{3})\b",
    r"\b([A-ZÑ&]{3,4}\d{6}[A-Z0-9]{3})\b",
];

const TOTAL: &[&str] = &[
    r"(?i)\btotal(?:[ \t]+a[ \t]+pagar)?[ \t]*:?[ \t]*\$?[ \t]*(\d{1,3}(?:,\d{3})+\.\d{2}|\d+\.\d{2})",
    r"(?i)\bimporte(?:[ \t]+total)?[ \t]*:?[ \t]*\$?[ \t]*(\d{1,3}(?:,\d{3})+\.\d{2}|\d+\.\d{2})",
    r"\$[ \t]*(\d{1,3}(?:,\d{3})+\.\d{2}|\d+\.\d{2})",
];

const CUENTA_MAYOR: &[&str] = &[
    r"(?i)\bcuenta[ \t]+(?:de[ \t]+)?mayor[ \t]*:?[ \t]*(\d[\d-]*)",
    r"(?i)\bcta\.?[ \t]*mayor[ \t]*:?[ \t]*(\d[\d-]*)",
];

const DESCRIPCION: &[&str] = &[
    r"(?is)\bdescripci[oó]n[ \t]*:?[ \t]*(.+?)(?:\n[ \t]*\n|\btotal\b|\bimporte\b|\z)",
    r"(?i)\bconcepto[ \t]*:?[ \t]*([^\n]+)",
];

const NO_DOCUMENTO: &[&str] = &[
    r"(?i)\bno\.?[ \t]*(?:de[ \t]+)?documento[ \t]*:?[ \t]*([A-Z0-9][A-Z0-9-]*)",
    r"(?i)\bdocumento[ \t]*:[ \t]*([A-Z0-9][A-Z0-9-]*)",
];

// Vale

pub const VALE_NO_VALE: &[&str] = &[
    r"(?i)\bvale[ \t]*(?:no\.?|n[uú]m(?:ero)?\.?|#)[ \t]*:?[ \t]*([A-Z0-9][A-Z0-9-]*)",
    r"(?i)\bno\.?[ \t]*(?:de[ \t]+)?vale[ \t]*:?[ \t]*([A-Z0-9][A-Z0-9-]*)",
    r"(?i)\bfolio[ \t]*:[ \t]*(\d+)",
];

pub const VALE_FECHA: &[&str] = FECHA;
pub const VALE_PROVEEDOR: &[&str] = PROVEEDOR;
pub const VALE_RFC: &[&str] = RFC;

pub const VALE_DEPARTAMENTO: &[&str] = &[
    r"(?im)\bdepartamento[ \t]*:[ \t]*([^\n]+?)[ \t]*(?:\bsucursal\b|\bmarca\b|$)",
    r"(?im)\bdepto\.?[ \t]*:?[ \t]*([^\n]+?)[ \t]*(?:\bsucursal\b|\bmarca\b|$)",
];

pub const VALE_SUCURSAL: &[&str] = &[
    r"(?im)\bsucursal[ \t]*:[ \t]*([^\n]+?)[ \t]*(?:\bdepartamento\b|\bmarca\b|$)",
];

pub const VALE_MARCA: &[&str] = &[
    r"(?im)\bmarca[ \t]*:[ \t]*([^\n]+?)[ \t]*(?:\bdepartamento\b|\bsucursal\b|\bmodelo\b|$)",
];

pub const VALE_TIPO: &[&str] = &[
    r"(?im)\btipo[ \t]*(?:de[ \t]*)?vale[ \t]*:?[ \t]*([^\n]+?)[ \t]*$",
    r"(?im)\btipo[ \t]*:[ \t]*([^\n]+?)[ \t]*$",
];

pub const VALE_DESCRIPCION: &[&str] = DESCRIPCION;
pub const VALE_NO_DOCUMENTO: &[&str] = NO_DOCUMENTO;
pub const VALE_CUENTA_MAYOR: &[&str] = CUENTA_MAYOR;
pub const VALE_TOTAL: &[&str] = TOTAL;

// Orden de pago

pub const ORDEN_NO_ORDEN: &[&str] = &[
    r"(?i)\borden[ \t]+de[ \t]+pago[ \t]*(?:no\.?|n[uú]m(?:ero)?\.?|#)?[ \t]*:?[ \t]*(\d+)",
    r"(?i)\bno\.?[ \t]*(?:de[ \t]+)?orden[ \t]*:?[ \t]*(\d+)",
];

pub const ORDEN_FECHA: &[&str] = FECHA;
pub const ORDEN_PROVEEDOR: &[&str] = PROVEEDOR;
pub const ORDEN_RFC: &[&str] = RFC;
pub const ORDEN_TOTAL: &[&str] = TOTAL;

pub const ORDEN_IMPORTE_LETRA: &[&str] = &[
    r"(?i)\bimporte[ \t]+(?:con|en)[ \t]+letra[ \t]*:?[ \t]*([^\n]+)",
    r"(?i)\(([^()\n]*pesos?[^()\n]*)\)",
    r"(?m)^[ \t]*([A-ZÁÉÍÓÚÑ \t]+PESOS?[ \t]*\d{2}/100[ \t]*M\.?[ \t]?N\.?)",
];

pub const ORDEN_BANCO: &[&str] = &[
    r"(?im)\bbanco[ \t]*:[ \t]*([^\n]+?)[ \t]*(?:\bcuenta\b|\bclabe\b|$)",
    r"(?im)\binstituci[oó]n[ \t]+bancaria[ \t]*:?[ \t]*([^\n]+?)[ \t]*$",
];

pub const ORDEN_CUENTA_BANCO: &[&str] = &[
    r"(?i)\b(?:no\.?[ \t]*(?:de[ \t]+)?)?cuenta(?:[ \t]+bancaria|[ \t]+de[ \t]+cheques)?[ \t]*:[ \t]*(\d[\d-]{4,22}\d)",
    r"(?i)\bcta\.?[ \t]*(?:bancaria)?[ \t]*:[ \t]*(\d[\d-]{4,22}\d)",
];

pub const ORDEN_CLABE: &[&str] = &[
    r"(?i)\bclabe(?:[ \t]+interbancaria)?[ \t]*:?[ \t]*(\d{3}[ \t]?\d{3}[ \t]?\d{11}[ \t]?\d)\b",
    r"\b(\d{18})\b",
];

pub const ORDEN_CUENTA_MAYOR: &[&str] = CUENTA_MAYOR;

pub const ORDEN_DESCRIPCION: &[&str] = &[
    r"(?i)\bconcepto(?:[ \t]+de[ \t]+pago)?[ \t]*:?[ \t]*([^\n]+)",
    r"(?is)\bdescripci[oó]n[ \t]*:?[ \t]*(.+?)(?:\n[ \t]*\n|\btotal\b|\bimporte\b|\z)",
];

pub const ORDEN_NO_DOCUMENTO: &[&str] = NO_DOCUMENTO;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::cascade::PatternCascade;
    use pretty_assertions::assert_eq;

    fn eval(patterns: &[&str], text: &str) -> Option<String> {
        PatternCascade::compile(patterns).unwrap().evaluate(text)
    }

    #[test]
    fn test_every_table_compiles() {
        for table in [
            VALE_NO_VALE, VALE_FECHA, VALE_PROVEEDOR, VALE_RFC, VALE_DEPARTAMENTO,
            VALE_SUCURSAL, VALE_MARCA, VALE_TIPO, VALE_DESCRIPCION, VALE_NO_DOCUMENTO,
            VALE_CUENTA_MAYOR, VALE_TOTAL, ORDEN_NO_ORDEN, ORDEN_IMPORTE_LETRA,
            ORDEN_BANCO, ORDEN_CUENTA_BANCO, ORDEN_CLABE, ORDEN_DESCRIPCION,
        ] {
            assert!(PatternCascade::compile(table).is_ok());
        }
    }

    #[test]
    fn test_code_label_fields_stop_at_next_caption() {
        let text = "Departamento: 6ADMINISTRACION   Sucursal: 1MONTERREY\nMarca: 2-NISSAN";
        assert_eq!(eval(VALE_DEPARTAMENTO, text).as_deref(), Some("6ADMINISTRACION"));
        assert_eq!(eval(VALE_SUCURSAL, text).as_deref(), Some("1MONTERREY"));
        assert_eq!(eval(VALE_MARCA, text).as_deref(), Some("2-NISSAN"));
    }

    #[test]
    fn test_fecha_labelled_before_bare() {
        let text = "Impreso 01/01/2024\nFecha: 20/03/2024";
        assert_eq!(eval(VALE_FECHA, text).as_deref(), Some("20/03/2024"));
        assert_eq!(eval(VALE_FECHA, "Impreso 01/01/2024").as_deref(), Some("01/01/2024"));
    }

    #[test]
    fn test_total_variants() {
        assert_eq!(eval(VALE_TOTAL, "TOTAL: $ 6,300.00").as_deref(), Some("6,300.00"));
        assert_eq!(eval(VALE_TOTAL, "Total a pagar 100.00").as_deref(), Some("100.00"));
        assert_eq!(eval(VALE_TOTAL, "Pagado $1,250.50 MXN").as_deref(), Some("1,250.50"));
        assert_eq!(eval(VALE_TOTAL, "Importe con letra: CIEN PESOS"), None);
    }

    #[test]
    fn test_rfc() {
        assert_eq!(eval(VALE_RFC, "R.F.C.: ABC010203XY1").as_deref(), Some("ABC010203XY1"));
        assert_eq!(eval(VALE_RFC, "emisor GOMJ800101AB2 ").as_deref(), Some("GOMJ800101AB2"));
    }

    #[test]
    fn test_importe_letra() {
        assert_eq!(
            eval(ORDEN_IMPORTE_LETRA, "Importe con letra: SEISMILTRESCIENTOSPESOS00/100M.N.").as_deref(),
            Some("SEISMILTRESCIENTOSPESOS00/100M.N.")
        );
        assert_eq!(
            eval(ORDEN_IMPORTE_LETRA, "Total $ 100.00 (CIEN PESOS 00/100 M.N.)").as_deref(),
            Some("CIEN PESOS 00/100 M.N.")
        );
        assert_eq!(
            eval(ORDEN_IMPORTE_LETRA, "Total 6,300.00\nSEIS MIL TRESCIENTOS PESOS 00/100 M.N.").as_deref(),
            Some("SEIS MIL TRESCIENTOS PESOS 00/100 M.N.")
        );
    }

    #[test]
    fn test_bank_fields() {
        let text = "Banco: BANORTE   Cuenta: 0123456789\nCLABE: 072 580 00123456789 1";
        assert_eq!(eval(ORDEN_BANCO, text).as_deref(), Some("BANORTE"));
        assert_eq!(eval(ORDEN_CUENTA_BANCO, text).as_deref(), Some("0123456789"));
        assert_eq!(eval(ORDEN_CLABE, text).as_deref(), Some("072 580 00123456789 1"));
    }

    #[test]
    fn test_cuenta_banco_skips_cuenta_mayor() {
        let text = "Cuenta mayor: 5101-001";
        assert_eq!(eval(ORDEN_CUENTA_BANCO, text), None);
        assert_eq!(eval(ORDEN_CUENTA_MAYOR, text).as_deref(), Some("5101-001"));
    }

    #[test]
    fn test_descripcion_runs_to_blank_line() {
        let text = "Descripción: Compra de llantas\npara unidad 12\n\nTotal: 100.00";
        assert_eq!(
            eval(VALE_DESCRIPCION, text).as_deref(),
            Some("Compra de llantas para unidad 12")
        );
    }
}
