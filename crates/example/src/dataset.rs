//! CSV parsing for the airports dataset.
//!
//! Three comma-separated files, each with a header row:
//!
//! - `airports.csv`: `id,name,city,country`
//! - `airlines.csv`: `id,name,iata,icao,callsign`
//! - `routes.csv`: `id,graph_id,parent_id,child_id`
//!
//! Malformed rows are skipped with a warning rather than aborting the load.

use std::fs;
use std::io;
use std::path::Path;

/// One airport row (a node).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Airport {
    /// Node ID.
    pub id: i64,
    /// Airport name.
    pub name: String,
    /// City served.
    pub city: String,
    /// Country served.
    pub country: String,
}

/// One airline row (a graph).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Airline {
    /// Graph ID.
    pub id: i64,
    /// Airline name.
    pub name: String,
    /// IATA code.
    pub iata: String,
    /// ICAO code.
    pub icao: String,
    /// Radio callsign.
    pub callsign: String,
}

/// One route row (an edge).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Edge ID.
    pub id: String,
    /// Owning airline.
    pub graph_id: i64,
    /// Source airport.
    pub parent_id: i64,
    /// Destination airport.
    pub child_id: i64,
}

/// A parsed airports dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Airports (nodes).
    pub airports: Vec<Airport>,
    /// Airlines (graphs).
    pub airlines: Vec<Airline>,
    /// Routes (edges).
    pub routes: Vec<Route>,
}

impl Dataset {
    /// Reads `airports.csv`, `airlines.csv`, and `routes.csv` from a
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if any of the three files cannot be read.
    pub fn from_dir(dir: &Path) -> io::Result<Self> {
        Ok(Self {
            airports: parse_airports(&fs::read_to_string(dir.join("airports.csv"))?),
            airlines: parse_airlines(&fs::read_to_string(dir.join("airlines.csv"))?),
            routes: parse_routes(&fs::read_to_string(dir.join("routes.csv"))?),
        })
    }
}

/// Splits a CSV body into data rows, skipping the header line and blanks.
fn rows(content: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    content
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| (number + 1, line.split(',').map(str::trim).collect::<Vec<_>>()))
}

/// Parses the airports file.
#[must_use]
pub fn parse_airports(content: &str) -> Vec<Airport> {
    rows(content)
        .filter_map(|(number, fields)| match fields.as_slice() {
            [id, name, city, country] => match id.parse() {
                Ok(id) => Some(Airport {
                    id,
                    name: (*name).to_string(),
                    city: (*city).to_string(),
                    country: (*country).to_string(),
                }),
                Err(_) => {
                    tracing::warn!(line = number, "airports.csv: unparseable id; row skipped");
                    None
                }
            },
            _ => {
                tracing::warn!(line = number, "airports.csv: wrong field count; row skipped");
                None
            }
        })
        .collect()
}

/// Parses the airlines file.
#[must_use]
pub fn parse_airlines(content: &str) -> Vec<Airline> {
    rows(content)
        .filter_map(|(number, fields)| match fields.as_slice() {
            [id, name, iata, icao, callsign] => match id.parse() {
                Ok(id) => Some(Airline {
                    id,
                    name: (*name).to_string(),
                    iata: (*iata).to_string(),
                    icao: (*icao).to_string(),
                    callsign: (*callsign).to_string(),
                }),
                Err(_) => {
                    tracing::warn!(line = number, "airlines.csv: unparseable id; row skipped");
                    None
                }
            },
            _ => {
                tracing::warn!(line = number, "airlines.csv: wrong field count; row skipped");
                None
            }
        })
        .collect()
}

/// Parses the routes file.
#[must_use]
pub fn parse_routes(content: &str) -> Vec<Route> {
    rows(content)
        .filter_map(|(number, fields)| match fields.as_slice() {
            [id, graph_id, parent_id, child_id] => {
                match (graph_id.parse(), parent_id.parse(), child_id.parse()) {
                    (Ok(graph_id), Ok(parent_id), Ok(child_id)) => Some(Route {
                        id: (*id).to_string(),
                        graph_id,
                        parent_id,
                        child_id,
                    }),
                    _ => {
                        tracing::warn!(line = number, "routes.csv: unparseable id; row skipped");
                        None
                    }
                }
            }
            _ => {
                tracing::warn!(line = number, "routes.csv: wrong field count; row skipped");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_rows() {
        let airports = parse_airports(
            "id,name,city,country\n\
             1,Goroka Airport,Goroka,Papua New Guinea\n\
             2,Madang Airport,Madang,Papua New Guinea\n",
        );
        assert_eq!(airports.len(), 2);
        assert_eq!(airports[0].id, 1);
        assert_eq!(airports[1].name, "Madang Airport");
    }

    #[test]
    fn skips_malformed_rows() {
        let airports = parse_airports(
            "id,name,city,country\n\
             not-a-number,X,Y,Z\n\
             3,Valid Airport,Town,Country\n\
             4,too,few\n",
        );
        assert_eq!(airports.len(), 1);
        assert_eq!(airports[0].id, 3);
    }

    #[test]
    fn skips_blank_lines_and_header() {
        let routes = parse_routes(
            "id,graph_id,parent_id,child_id\n\
             \n\
             r1,10,1,2\n",
        );
        assert_eq!(
            routes,
            vec![Route {
                id: "r1".to_string(),
                graph_id: 10,
                parent_id: 1,
                child_id: 2,
            }]
        );
    }
}
