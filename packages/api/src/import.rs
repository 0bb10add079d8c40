//! # CSV lead importer — parsing half
//!
//! Parses the text of an uploaded CSV file into [`LeadDraft`]s ready for the
//! bulk-insert server function. The grammar is deliberately simple: lines are
//! split on `\r\n` or `\n`, fields on every comma. Quoted fields are NOT
//! interpreted, so a value containing a comma will be split apart — the
//! downloadable template documents this, and the export path (which does
//! quote) is a separate code path.
//!
//! Tolerance rules, per row:
//! - a blank `nome` skips the row with a line-numbered warning, it never
//!   aborts the batch;
//! - an unparseable `valor` becomes `0`;
//! - a blank or unrecognized `origem` becomes `outros`.
//!
//! The header row is fatal when invalid: all required columns must be
//! present (any order, extra columns ignored).

use serde::{Deserialize, Serialize};

use crate::models::{LeadDraft, LeadOrigin, LeadStatus};

/// Columns the header must contain.
pub const REQUIRED_COLUMNS: [&str; 6] = ["nome", "empresa", "email", "telefone", "valor", "origem"];

/// Header line for the downloadable template.
pub const TEMPLATE_HEADER: &str = "nome,empresa,email,telefone,valor,origem";

/// Sample row for the downloadable template.
pub const TEMPLATE_ROW: &str = "Exemplo Lead,Empresa Exemplo,exemplo@email.com,5511999999999,1500.50,formulario";

/// Fatal parse failures (the batch cannot proceed at all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CsvError {
    /// No header or no data rows.
    Empty,
    /// Header is missing one or more required columns.
    MissingColumns(Vec<String>),
}

impl std::fmt::Display for CsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvError::Empty => write!(f, "Arquivo CSV vazio ou inválido"),
            CsvError::MissingColumns(cols) => {
                write!(f, "Cabeçalho do CSV inválido: faltam as colunas {}", cols.join(", "))
            }
        }
    }
}

/// A row that was dropped, with its 1-based line number in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: String,
}

/// Outcome of a parse: the importable drafts plus per-row warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvImport {
    pub rows: Vec<LeadDraft>,
    pub skipped: Vec<SkippedRow>,
}

/// Parse CSV text into lead drafts. `responsavel_id` on every draft is set
/// to `importer_id` — imported leads belong to whoever imported them.
pub fn parse_leads_csv(text: &str, importer_id: &str) -> Result<CsvImport, CsvError> {
    // Keep original line numbers for warnings, then drop blank lines.
    let lines: Vec<(usize, &str)> = text
        .split('\n')
        .map(|l| l.trim_end_matches('\r'))
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(CsvError::Empty);
    }

    let header: Vec<String> = lines[0]
        .1
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !header.iter().any(|h| h == *c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CsvError::MissingColumns(missing));
    }

    let column = |name: &str| header.iter().position(|h| h == name);
    let idx_nome = column("nome").unwrap();
    let idx_empresa = column("empresa").unwrap();
    let idx_email = column("email").unwrap();
    let idx_telefone = column("telefone").unwrap();
    let idx_valor = column("valor").unwrap();
    let idx_origem = column("origem").unwrap();

    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for (line_no, line) in &lines[1..] {
        let values: Vec<&str> = line.split(',').map(str::trim).collect();
        let field = |idx: usize| values.get(idx).copied().unwrap_or("");
        let optional = |idx: usize| {
            let v = field(idx);
            if v.is_empty() { None } else { Some(v.to_string()) }
        };

        let nome = field(idx_nome);
        if nome.is_empty() {
            skipped.push(SkippedRow {
                line: *line_no,
                reason: "o nome é obrigatório".to_string(),
            });
            continue;
        }

        rows.push(LeadDraft {
            nome: nome.to_string(),
            empresa: optional(idx_empresa),
            email: optional(idx_email),
            telefone: optional(idx_telefone),
            valor: field(idx_valor).parse::<f64>().unwrap_or(0.0),
            origem: LeadOrigin::parse_or_default(field(idx_origem)),
            status: LeadStatus::Novo,
            responsavel_id: Some(importer_id.to_string()),
            observacoes: None,
        });
    }

    Ok(CsvImport { rows, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMPORTER: &str = "7b0c9a52-1111-2222-3333-444455556666";

    #[test]
    fn parses_a_well_formed_row() {
        let text = "nome,empresa,email,telefone,valor,origem\n\
                    Ana,AcmeCo,ana@x.com,5511999999999,1500.50,formulario\n";
        let import = parse_leads_csv(text, IMPORTER).unwrap();
        assert_eq!(import.rows.len(), 1);
        assert!(import.skipped.is_empty());

        let draft = &import.rows[0];
        assert_eq!(draft.nome, "Ana");
        assert_eq!(draft.empresa.as_deref(), Some("AcmeCo"));
        assert_eq!(draft.valor, 1500.50);
        assert_eq!(draft.origem, LeadOrigin::Formulario);
        assert_eq!(draft.status, LeadStatus::Novo);
        assert_eq!(draft.responsavel_id.as_deref(), Some(IMPORTER));
    }

    #[test]
    fn skips_rows_without_a_name() {
        let text = "nome,empresa,email,telefone,valor,origem\n\
                    ,SemNome,x@x.com,551100000000,10,outros\n\
                    Bia,,,,,\n";
        let import = parse_leads_csv(text, IMPORTER).unwrap();
        assert_eq!(import.rows.len(), 1);
        assert_eq!(import.rows[0].nome, "Bia");
        assert_eq!(import.skipped.len(), 1);
        assert_eq!(import.skipped[0].line, 2);
    }

    #[test]
    fn header_columns_are_order_independent_and_extras_ignored() {
        let text = "origem,valor,telefone,email,empresa,nome,etiqueta\n\
                    whatsapp,250,5511988887777,c@x.com,Cia,Carla,vip\n";
        let import = parse_leads_csv(text, IMPORTER).unwrap();
        assert_eq!(import.rows[0].nome, "Carla");
        assert_eq!(import.rows[0].origem, LeadOrigin::Whatsapp);
        assert_eq!(import.rows[0].valor, 250.0);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let text = "nome,empresa,email,telefone,valor\nAna,,,,\n";
        match parse_leads_csv(text, IMPORTER) {
            Err(CsvError::MissingColumns(cols)) => assert_eq!(cols, ["origem"]),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn empty_file_and_header_only_are_fatal() {
        assert_eq!(parse_leads_csv("", IMPORTER), Err(CsvError::Empty));
        assert_eq!(
            parse_leads_csv("nome,empresa,email,telefone,valor,origem\n", IMPORTER),
            Err(CsvError::Empty)
        );
    }

    #[test]
    fn bad_value_and_blank_origin_fall_back() {
        let text = "nome,empresa,email,telefone,valor,origem\n\
                    Davi,,,,abc,\n";
        let import = parse_leads_csv(text, IMPORTER).unwrap();
        assert_eq!(import.rows[0].valor, 0.0);
        assert_eq!(import.rows[0].origem, LeadOrigin::Outros);
    }

    #[test]
    fn blank_lines_and_crlf_are_tolerated() {
        let text = "nome,empresa,email,telefone,valor,origem\r\n\
                    \r\n\
                    Eva,,,,,indicacao\r\n";
        let import = parse_leads_csv(text, IMPORTER).unwrap();
        assert_eq!(import.rows.len(), 1);
        assert_eq!(import.rows[0].origem, LeadOrigin::Indicacao);
    }

    // Commas inside fields are split apart: documented template limitation.
    #[test]
    fn embedded_commas_are_not_quoted_away() {
        let text = "nome,empresa,email,telefone,valor,origem\n\
                    \"Silva, Ana\",Acme,a@x.com,55110000,10,outros\n";
        let import = parse_leads_csv(text, IMPORTER).unwrap();
        assert_eq!(import.rows[0].nome, "\"Silva");
        assert_eq!(import.rows[0].empresa.as_deref(), Some("Ana\""));
    }
}
