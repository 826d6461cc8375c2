use std::{
    fs::File,
    io::{self, BufReader, Read},
};

use crate::{
    Error, Result, Stop,
    options::{InputFormat, OptimizerOptions},
};

const REQUIRED_CSV_COLUMNS: [&str; 3] = ["id", "latitude", "longitude"];

/// Reads the stop list named by `--input` (or stdin) in the resolved format.
pub fn read_stops(options: &OptimizerOptions) -> Result<Vec<Stop>> {
    let format = options.resolved_input_format();
    let stops = match options.input_path() {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                Error::invalid_input(format!("failed to open input {}: {e}", path.display()))
            })?;
            log::debug!("input: reading {format} from {}", path.display());
            parse_stops(BufReader::new(file), format)?
        }
        None => {
            log::debug!("input: reading {format} from stdin");
            parse_stops(io::stdin().lock(), format)?
        }
    };

    if stops.is_empty() {
        return Err(Error::invalid_input("No stops provided."));
    }
    Ok(stops)
}

/// Parses stops without validating coordinates; validation happens when a
/// route is built so that errors name the offending stop.
pub fn parse_stops<R: Read>(reader: R, format: InputFormat) -> Result<Vec<Stop>> {
    match format {
        InputFormat::Csv => parse_csv_stops(reader),
        InputFormat::Json => Ok(serde_json::from_reader(reader)?),
    }
}

fn parse_csv_stops<R: Read>(reader: R) -> Result<Vec<Stop>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_CSV_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::invalid_input(format!(
                "CSV header is missing required column '{column}' (found: {})",
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }
    }

    let mut stops = Vec::new();
    for (idx, row) in reader.deserialize::<Stop>().enumerate() {
        let stop = row.map_err(|e| Error::invalid_input(format!("Row {}: {e}", idx + 1)))?;
        stops.push(stop);
    }
    Ok(stops)
}
