use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::string::FromUtf8Error;
use stockyard_catalog::{ProductRecord, RecordError, Warehouse, WarehouseError};
use stockyard_core::{IdAllocator, ProductId};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error("line {line}: not valid UTF-8: {source}")]
    Encoding {
        line: usize,
        #[source]
        source: FromUtf8Error,
    },

    #[error("line {line}: {source}")]
    Warehouse {
        line: usize,
        #[source]
        source: WarehouseError,
    },
}

impl StoreError {
    fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

/// Outcome of a load: what made it in and which lines were skipped
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<ProductId>,
    pub skipped: Vec<StoreError>,
}

/// Read product records, one per line, into the warehouse.
///
/// Blank lines are ignored. A line that is not UTF-8, fails to parse or
/// collides with a stocked id is logged, recorded in the report and
/// skipped; loading continues with the next line. Only read failures
/// abort the load.
pub fn load_products<R: BufRead>(
    reader: R,
    warehouse: &mut Warehouse,
    ids: &IdAllocator,
) -> Result<LoadReport, io::Error> {
    let mut report = LoadReport::default();

    for (index, raw) in reader.split(b'\n').enumerate() {
        let line_no = index + 1;
        let line = match String::from_utf8(raw?) {
            Ok(line) => line,
            Err(source) => {
                tracing::error!(
                    line = line_no,
                    error = %source,
                    "Skipping product record with invalid encoding"
                );
                report.skipped.push(StoreError::Encoding { line: line_no, source });
                continue;
            }
        };
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.trim().is_empty() {
            continue;
        }

        let record = match ProductRecord::parse(line) {
            Ok(record) => record,
            Err(source) => {
                tracing::error!(
                    line = line_no,
                    error = %source,
                    "Skipping malformed product record"
                );
                report.skipped.push(StoreError::Record { line: line_no, source });
                continue;
            }
        };

        match warehouse.add(record.into_product(ids)) {
            Ok(id) => report.loaded.push(id),
            Err(source) => {
                tracing::error!(
                    line = line_no,
                    error = %source,
                    "Skipping product record with a stocked id"
                );
                report.skipped.push(StoreError::Warehouse { line: line_no, source });
            }
        }
    }

    tracing::info!(loaded = report.loaded.len(), skipped = report.skipped.len(), "Products loaded");
    Ok(report)
}

/// Write every product as a record line; returns the number written
pub fn save_products<W: Write>(mut writer: W, warehouse: &Warehouse) -> Result<usize, io::Error> {
    for product in warehouse {
        writeln!(writer, "{}", product.to_record())?;
    }
    writer.flush()?;
    Ok(warehouse.len())
}

pub fn load_from_path(
    path: impl AsRef<Path>,
    warehouse: &mut Warehouse,
    ids: &IdAllocator,
) -> Result<LoadReport, StoreError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let report = load_products(BufReader::new(file), warehouse, ids)
        .map_err(|e| StoreError::io(path, e))?;
    tracing::info!(path = %path.display(), "Loaded product file");
    Ok(report)
}

pub fn save_to_path(path: impl AsRef<Path>, warehouse: &Warehouse) -> Result<usize, StoreError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
    let written = save_products(BufWriter::new(file), warehouse)
        .map_err(|e| StoreError::io(path, e))?;
    tracing::info!(path = %path.display(), written, "Saved product file");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use stockyard_catalog::{Product, ProductKind};

    #[test]
    fn test_load_skips_bad_lines_and_continues() {
        let input = concat!(
            "Electronic \"Laptop Pro\" 4500 10 1.2 \"2 years\"\n",
            "\n",
            "Gadget \"Widget\" 1 1 1 \"x\"\n",
            "Clothing \"Jeans\" abc 25 0.4 \"M\"\n",
            "Food \"Organic Apples\" 4.5 10 1 \"2025-12-31\"\n",
        );
        let mut warehouse = Warehouse::new();
        let ids = IdAllocator::starting_at(1);

        let report = load_products(Cursor::new(input), &mut warehouse, &ids).unwrap();

        assert_eq!(report.loaded.len(), 2);
        assert_eq!(warehouse.len(), 2);
        assert_eq!(report.skipped.len(), 2);
        assert!(matches!(
            &report.skipped[0],
            StoreError::Record { line: 3, source: RecordError::UnknownType(tag) } if tag == "Gadget"
        ));
        assert!(matches!(
            &report.skipped[1],
            StoreError::Record {
                line: 4,
                source: RecordError::InvalidNumber { field: "price", .. }
            }
        ));
        assert_eq!(warehouse.products()[1].kind(), ProductKind::Food);
        // malformed lines never consume ids
        assert_eq!(report.loaded, vec![ProductId::new(1), ProductId::new(2)]);
    }

    #[test]
    fn test_load_skips_invalid_utf8_lines() {
        let mut input = b"Food Tea 1 1 0.1 2030\nFood \"".to_vec();
        input.extend_from_slice(&[0xff, 0xfe]);
        input.extend_from_slice(b"\" 1 1 0.1 \"x\"\r\nFood Rice 2 2 1 2031\r\n");
        let mut warehouse = Warehouse::new();
        let ids = IdAllocator::starting_at(1);

        let report = load_products(Cursor::new(input), &mut warehouse, &ids).unwrap();

        assert_eq!(report.loaded, vec![ProductId::new(1), ProductId::new(2)]);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(report.skipped[0], StoreError::Encoding { line: 2, .. }));
        assert_eq!(warehouse.find_by_id(ProductId::new(2)).unwrap().name(), "Rice");
        assert_eq!(warehouse.find_by_id(ProductId::new(2)).unwrap().details().value(), "2031");
    }

    #[test]
    fn test_load_reports_id_collisions() {
        let ids = IdAllocator::starting_at(1);
        let mut warehouse = Warehouse::new();
        let tea = ProductRecord::parse("Food Tea 1 1 0.1 2030").unwrap();
        warehouse.add(tea.into_product(&IdAllocator::starting_at(1))).unwrap();

        let input = Cursor::new("Food Rice 2 2 1 2031\n");
        let report = load_products(input, &mut warehouse, &ids).unwrap();
        assert!(report.loaded.is_empty());
        assert!(matches!(report.skipped[0], StoreError::Warehouse { line: 1, .. }));
    }

    #[test]
    fn test_save_then_load() {
        let mut warehouse = Warehouse::new();
        warehouse.add(Product::electronic("Laptop Pro", 4500.0, 10, 1.2, "2 years")).unwrap();
        warehouse.add(Product::clothing("Winter \"Puffer\" Jacket", 219.9, 4, 1.1, "XL")).unwrap();
        warehouse.add(Product::food("Yogurt", 3.5, 100, 0.2, "2024-10-01")).unwrap();

        let mut buffer = Vec::new();
        assert_eq!(save_products(&mut buffer, &warehouse).unwrap(), 3);

        let mut restored = Warehouse::new();
        let ids = IdAllocator::global();
        let report = load_products(Cursor::new(buffer), &mut restored, ids).unwrap();
        assert!(report.skipped.is_empty());

        for (before, after) in warehouse.iter().zip(restored.iter()) {
            assert_eq!(before.name(), after.name());
            assert_eq!(before.price(), after.price());
            assert_eq!(before.quantity(), after.quantity());
            assert_eq!(before.weight(), after.weight());
            assert_eq!(before.details(), after.details());
        }
    }

    #[test]
    fn test_path_round_trip() {
        let file_name = format!("stockyard-products-{}.txt", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        let mut warehouse = Warehouse::new();
        warehouse.add(Product::food("Honey", 12.0, 3, 0.5, "2027-06-30")).unwrap();

        assert_eq!(save_to_path(&path, &warehouse).unwrap(), 1);
        let mut restored = Warehouse::new();
        let report = load_from_path(&path, &mut restored, IdAllocator::global()).unwrap();
        assert_eq!(report.loaded.len(), 1);
        assert_eq!(restored.products()[0].name(), "Honey");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file() {
        let mut warehouse = Warehouse::new();
        let path = "/nonexistent/stockyard/products.txt";
        let result = load_from_path(path, &mut warehouse, IdAllocator::global());
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
