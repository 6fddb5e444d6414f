//! Export du tableau récapitulatif en CSV

use std::path::Path;

use anyhow::{Context, Result};

use subzone::{display_value, Mode, TableRow};

/// En-têtes selon le mode
pub fn headers(mode: Mode, id_key: &str) -> Vec<String> {
    let mut headers = vec![
        id_key.to_string(),
        "population".to_string(),
        "capacity".to_string(),
    ];
    if mode == Mode::DemandMismatch {
        headers.push("net_supply".to_string());
    }
    headers
}

/// Écrit les lignes dans l'ordre reçu, retourne le nombre de lignes
pub fn export_table_csv(rows: &[TableRow], mode: Mode, id_key: &str, output_path: &Path) -> Result<usize> {
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("Failed to create file: {}", output_path.display()))?;

    writer.write_record(headers(mode, id_key))?;
    for row in rows {
        let mut record = vec![
            row.id.clone(),
            // Cellule vide pour une population non numérique
            row.population.map(|p| p.to_string()).unwrap_or_default(),
            row.capacity.to_string(),
        ];
        if mode == Mode::DemandMismatch {
            record.push(row.net_supply.unwrap_or(0.0).to_string());
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;

    Ok(rows.len())
}

/// Rendu texte aligné pour la console
pub fn format_table(rows: &[TableRow], mode: Mode, id_key: &str) -> String {
    let headers = headers(mode, id_key);
    let id_width = rows
        .iter()
        .map(|r| r.id.chars().count())
        .chain(std::iter::once(headers[0].len()))
        .max()
        .unwrap_or(0);

    let mut out = format!("{:<id_width$}", headers[0]);
    for h in &headers[1..] {
        out.push_str(&format!("  {:>12}", h));
    }
    out.push('\n');

    for row in rows {
        out.push_str(&format!(
            "{:<id_width$}  {:>12}  {:>12}",
            row.id,
            display_value(row.population),
            row.capacity
        ));
        if let Some(net) = row.net_supply {
            out.push_str(&format!("  {:>12}", net));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<TableRow> {
        vec![
            TableRow {
                id: "ALPHA".to_string(),
                population: Some(130.0),
                capacity: 120,
                net_supply: Some(-10.0),
            },
            TableRow {
                id: "BRAVO, EAST".to_string(),
                population: Some(70.0),
                capacity: 90,
                net_supply: Some(20.0),
            },
        ]
    }

    #[test]
    fn test_headers() {
        assert_eq!(headers(Mode::Population, "SUBZONE_N").len(), 3);
        assert_eq!(headers(Mode::DemandMismatch, "SUBZONE_N")[3], "net_supply");
    }

    #[test]
    fn test_export_table_csv() {
        let output_path = std::env::temp_dir().join("preschool_map_table_test.csv");
        let count = export_table_csv(&rows(), Mode::DemandMismatch, "SUBZONE_N", &output_path).unwrap();
        assert_eq!(count, 2);

        let content = std::fs::read_to_string(&output_path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "SUBZONE_N,population,capacity,net_supply");
        assert_eq!(lines[1], "ALPHA,130,120,-10");
        assert_eq!(lines[2], "\"BRAVO, EAST\",70,90,20");

        std::fs::remove_file(output_path).ok();
    }

    #[test]
    fn test_format_table() {
        let text = format_table(&rows(), Mode::DemandMismatch, "SUBZONE_N");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("SUBZONE_N"));
        assert!(lines[1].starts_with("ALPHA"));
        assert!(lines[1].trim_end().ends_with("-10"));
    }

    #[test]
    fn test_non_numeric_population_cells() {
        let rows = vec![TableRow {
            id: "GAP".to_string(),
            population: None,
            capacity: 15,
            net_supply: Some(-5.0),
        }];
        let output_path = std::env::temp_dir().join("preschool_map_table_gap_test.csv");
        export_table_csv(&rows, Mode::DemandMismatch, "SUBZONE_N", &output_path).unwrap();
        let content = std::fs::read_to_string(&output_path).unwrap();
        assert_eq!(content.lines().nth(1), Some("GAP,,15,-5"));
        std::fs::remove_file(output_path).ok();

        let text = format_table(&rows, Mode::DemandMismatch, "SUBZONE_N");
        assert!(text.lines().nth(1).unwrap().contains("n/a"));
    }
}
