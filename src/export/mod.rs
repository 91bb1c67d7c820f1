use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Context, Result};
use crate::listing::Listing;
use crate::utils::snapshot_timestamp_slug;

/// Column order of exported files; matches the API's wire names.
pub const CSV_HEADER: [&str; 12] = [
    "id",
    "nome",
    "bairro",
    "descricao",
    "tipo",
    "finalidade",
    "status",
    "area_terreno",
    "area_construida",
    "valor_aluguel",
    "valor_venda",
    "imagem",
];

/// A directory target gets a timestamped file name; anything else is used as-is.
pub fn resolve_export_path(target: &Path, prefix: &str) -> PathBuf {
    if target.is_dir() {
        target.join(format!("{}_{}.csv", prefix, snapshot_timestamp_slug()))
    } else {
        target.to_path_buf()
    }
}

pub fn write_listings_csv<W: Write>(writer: W, listings: &[Listing]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(CSV_HEADER)?;

    for listing in listings {
        writer.write_record([
            listing.id.to_string(),
            listing.name.clone(),
            listing.neighborhood.clone(),
            listing.description.clone(),
            listing.kind.clone(),
            listing.purposes.join("|"),
            listing.status.clone(),
            optional(listing.land_area),
            optional(listing.built_area),
            optional(listing.rent_price),
            optional(listing.sale_price),
            listing.image.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Persist listings to `target` (file or directory) and return the written path.
pub fn save_listings_csv(target: &Path, prefix: &str, listings: &[Listing]) -> Result<PathBuf> {
    let path = resolve_export_path(target, prefix);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file = fs::File::create(&path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
    write_listings_csv(file, listings)?;
    Ok(path)
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Listing> {
        let mut first = Listing::new(1, "Casa, com vírgula");
        first.purposes = vec!["VENDA".to_string(), "LOCACAO".to_string()];
        first.sale_price = Some(250_000.0);
        vec![first, Listing::new(2, "Terreno")]
    }

    #[test]
    fn writes_header_and_rows() {
        let mut buffer = Vec::new();
        write_listings_csv(&mut buffer, &sample()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,nome,bairro"));
        assert!(lines[1].starts_with("1,\"Casa, com vírgula\""));
        assert!(lines[1].contains("VENDA|LOCACAO"));
        assert!(lines[1].contains("250000"));
        assert!(lines[2].starts_with("2,Terreno"));
    }

    #[test]
    fn directory_target_gets_timestamped_name() {
        let dir = tempfile::tempdir().unwrap();

        let path = save_listings_csv(dir.path(), "favoritos", &sample()).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("favoritos_"), "{name}");
        assert!(name.ends_with(".csv"));
        assert!(path.exists());
    }

    #[test]
    fn file_target_is_used_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out.csv");

        let path = save_listings_csv(&target, "imoveis", &sample()).unwrap();

        assert_eq!(path, target);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
