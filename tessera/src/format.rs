//! The formats supported by this toolkit, and how to recognize them.
use std::fmt;

/// A concrete syntax for RDF datasets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatasetFormat {
    TriX,
    JsonLd,
}

impl DatasetFormat {
    pub const ALL: [DatasetFormat; 2] = [DatasetFormat::TriX, DatasetFormat::JsonLd];

    /// The preferred media type of this format.
    pub fn media_type(&self) -> &'static str {
        match self {
            DatasetFormat::TriX => "application/trix",
            DatasetFormat::JsonLd => "application/ld+json",
        }
    }

    /// The default file extension of this format (without the dot).
    pub fn file_extension(&self) -> &'static str {
        match self {
            DatasetFormat::TriX => "xml",
            DatasetFormat::JsonLd => "jsonld",
        }
    }

    /// Recognize a media type; parameters (`; charset=...`) and case are ignored.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match essence(media_type).as_str() {
            "application/trix" => Some(DatasetFormat::TriX),
            "application/ld+json" => Some(DatasetFormat::JsonLd),
            _ => None,
        }
    }

    /// Recognize a file extension (without the dot), case-insensitively.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "xml" | "trix" => Some(DatasetFormat::TriX),
            "jsonld" | "json" => Some(DatasetFormat::JsonLd),
            _ => None,
        }
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetFormat::TriX => write!(f, "TriX"),
            DatasetFormat::JsonLd => write!(f, "JSON-LD"),
        }
    }
}

/// A concrete syntax for SPARQL query results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResultsFormat {
    Csv,
    Tsv,
    Boolean,
    Xml,
    Json,
}

impl ResultsFormat {
    pub const ALL: [ResultsFormat; 5] = [
        ResultsFormat::Csv,
        ResultsFormat::Tsv,
        ResultsFormat::Boolean,
        ResultsFormat::Xml,
        ResultsFormat::Json,
    ];

    /// The preferred media type of this format.
    pub fn media_type(&self) -> &'static str {
        match self {
            ResultsFormat::Csv => "text/csv",
            ResultsFormat::Tsv => "text/tab-separated-values",
            ResultsFormat::Boolean => "text/boolean",
            ResultsFormat::Xml => "application/sparql-results+xml",
            ResultsFormat::Json => "application/sparql-results+json",
        }
    }

    /// The default file extension of this format (without the dot).
    pub fn file_extension(&self) -> &'static str {
        match self {
            ResultsFormat::Csv => "csv",
            ResultsFormat::Tsv => "tsv",
            ResultsFormat::Boolean => "txt",
            ResultsFormat::Xml => "srx",
            ResultsFormat::Json => "srj",
        }
    }

    /// Recognize a media type; parameters (`; charset=...`) and case are ignored.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match essence(media_type).as_str() {
            "text/csv" | "text/comma-separated-values" => Some(ResultsFormat::Csv),
            "text/tab-separated-values" => Some(ResultsFormat::Tsv),
            "text/boolean" => Some(ResultsFormat::Boolean),
            "application/sparql-results+xml" => Some(ResultsFormat::Xml),
            "application/sparql-results+json" => Some(ResultsFormat::Json),
            _ => None,
        }
    }

    /// Recognize a file extension (without the dot), case-insensitively.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Some(ResultsFormat::Csv),
            "tsv" => Some(ResultsFormat::Tsv),
            "txt" => Some(ResultsFormat::Boolean),
            "srx" => Some(ResultsFormat::Xml),
            "srj" => Some(ResultsFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for ResultsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultsFormat::Csv => write!(f, "SPARQL CSV"),
            ResultsFormat::Tsv => write!(f, "SPARQL TSV"),
            ResultsFormat::Boolean => write!(f, "SPARQL boolean"),
            ResultsFormat::Xml => write!(f, "SPARQL XML"),
            ResultsFormat::Json => write!(f, "SPARQL JSON"),
        }
    }
}

/// How an input is compressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    #[default]
    None,
    Gzip,
}

impl Compression {
    /// Split a file name into its compression and the rest of the name,
    /// e.g. `data.srj.gz` gives `(Gzip, "data.srj")`.
    pub fn from_file_name(file_name: &str) -> (Self, &str) {
        match file_name.rsplit_once('.') {
            Some((stem, ext)) if ext.eq_ignore_ascii_case("gz") => (Compression::Gzip, stem),
            _ => (Compression::None, file_name),
        }
    }
}

/// The extension of `file_name` (without the dot), if any.
pub fn extension(file_name: &str) -> Option<&str> {
    let name = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// The lowercased media type without its parameters.
fn essence(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test]
    fn dataset_media_types_round_trip() {
        for format in DatasetFormat::ALL {
            assert_eq!(DatasetFormat::from_media_type(format.media_type()), Some(format));
            assert_eq!(DatasetFormat::from_extension(format.file_extension()), Some(format));
        }
    }

    #[test]
    fn results_media_types_round_trip() {
        for format in ResultsFormat::ALL {
            assert_eq!(ResultsFormat::from_media_type(format.media_type()), Some(format));
            assert_eq!(ResultsFormat::from_extension(format.file_extension()), Some(format));
        }
    }

    #[test_case("text/csv; charset=utf-8", Some(ResultsFormat::Csv))]
    #[test_case("Text/Comma-Separated-Values", Some(ResultsFormat::Csv))]
    #[test_case(" application/sparql-results+json ", Some(ResultsFormat::Json))]
    #[test_case("application/json", None)]
    fn results_media_type(media_type: &str, expected: Option<ResultsFormat>) {
        assert_eq!(ResultsFormat::from_media_type(media_type), expected);
    }

    #[test_case("data.srj.gz", Compression::Gzip, "data.srj")]
    #[test_case("data.TRIX.GZ", Compression::Gzip, "data.TRIX")]
    #[test_case("data.csv", Compression::None, "data.csv")]
    #[test_case("gz", Compression::None, "gz")]
    fn compression_from_file_name(name: &str, compression: Compression, rest: &str) {
        assert_eq!(Compression::from_file_name(name), (compression, rest));
    }

    #[test_case("dir.d/data.tsv", Some("tsv"))]
    #[test_case("dir.d/data", None)]
    #[test_case("data.jsonld", Some("jsonld"))]
    fn file_extension(name: &str, expected: Option<&str>) {
        assert_eq!(extension(name), expected);
    }
}
