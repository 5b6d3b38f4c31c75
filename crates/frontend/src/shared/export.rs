//! Spreadsheet export: `;`-separated UTF-8 CSV with BOM, which Excel and
//! LibreOffice open directly.

use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// A report ready to be written out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvReport {
    pub title: String,
    /// Already formatted ("10/06/2024 14:30")
    pub generated_at: String,
    /// (label, value) of every active filter
    pub filters: Vec<(String, String)>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub footer: Option<String>,
}

impl CsvReport {
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // BOM so accented characters survive in Excel
        csv.push('\u{FEFF}');

        push_line(&mut csv, &[self.title.as_str()]);
        push_line(&mut csv, &["Gerado em", self.generated_at.as_str()]);
        if self.filters.is_empty() {
            push_line(&mut csv, &["Filtros", "Nenhum"]);
        } else {
            let summary = self
                .filters
                .iter()
                .map(|(label, value)| format!("{label}: {value}"))
                .collect::<Vec<_>>()
                .join(" | ");
            push_line(&mut csv, &["Filtros", summary.as_str()]);
        }
        push_line(&mut csv, &["Colunas", self.headers.join(", ").as_str()]);
        csv.push('\n');

        let headers: Vec<&str> = self.headers.iter().map(String::as_str).collect();
        push_line(&mut csv, &headers);
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            push_line(&mut csv, &cells);
        }

        csv.push('\n');
        push_line(&mut csv, &["Total de registros", self.rows.len().to_string().as_str()]);
        if let Some(footer) = &self.footer {
            push_line(&mut csv, &[footer.as_str()]);
        }
        csv
    }

    /// Builds the CSV and triggers the browser download
    pub fn download(&self, filename: &str) -> Result<(), String> {
        if self.rows.is_empty() {
            return Err("Nenhum dado para exportar".to_string());
        }
        let blob = create_csv_blob(&self.to_csv())?;
        download_blob(&blob, filename)
    }
}

fn push_line(csv: &mut String, cells: &[&str]) {
    let escaped: Vec<String> = cells.iter().map(|c| escape_csv_cell(c)).collect();
    csv.push_str(&escaped.join(";"));
    csv.push('\n');
}

/// Quotes the cell if it holds the separator, quotes or line breaks
fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        let escaped = cell.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        cell.to_string()
    }
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_csv_cell() {
        assert_eq!(escape_csv_cell("simples"), "simples");
        assert_eq!(escape_csv_cell("a;b"), "\"a;b\"");
        assert_eq!(escape_csv_cell("diz \"oi\""), "\"diz \"\"oi\"\"\"");
        assert_eq!(escape_csv_cell("linha\nnova"), "\"linha\nnova\"");
    }

    #[test]
    fn test_report_layout() {
        let report = CsvReport {
            title: "Relatório de Atendimentos".into(),
            generated_at: "10/06/2024 14:30".into(),
            filters: vec![("Status".into(), "Realizado".into())],
            headers: vec!["Título".into(), "Cliente".into()],
            rows: vec![vec!["Visita; técnica".into(), "ACME".into()]],
            footer: Some("ACME Serviços LTDA".into()),
        };
        let csv = report.to_csv();
        let lines: Vec<&str> = csv.trim_start_matches('\u{FEFF}').lines().collect();
        assert!(csv.starts_with('\u{FEFF}'));
        assert_eq!(lines[0], "Relatório de Atendimentos");
        assert_eq!(lines[1], "Gerado em;10/06/2024 14:30");
        assert_eq!(lines[2], "Filtros;Status: Realizado");
        assert_eq!(lines[3], "Colunas;Título, Cliente");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Título;Cliente");
        assert_eq!(lines[6], "\"Visita; técnica\";ACME");
        assert_eq!(lines[8], "Total de registros;1");
        assert_eq!(lines[9], "ACME Serviços LTDA");
    }

    #[test]
    fn test_report_without_filters_or_footer() {
        let csv = CsvReport {
            title: "T".into(),
            ..Default::default()
        }
        .to_csv();
        assert!(csv.contains("Filtros;Nenhum\n"));
        assert!(csv.ends_with("Total de registros;0\n"));
    }
}
