//! NumPy `.npy` reader/writer for 2-D float matrices

use ndarray::{Array2, ShapeBuilder};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

const MAGIC: &[u8] = b"\x93NUMPY";
const ALIGNMENT: usize = 64;

/// Format problems are reported as plain strings; callers attach the path.
#[derive(Debug)]
pub enum NpyError {
	Io(io::Error),
	Format(String),
}

impl From<io::Error> for NpyError {
	fn from(e: io::Error) -> Self {
		Self::Io(e)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dtype {
	F32,
	F64,
}

impl Dtype {
	fn parse(descr: &str) -> Option<Self> {
		match descr {
			"<f4" | "f4" => Some(Self::F32),
			"<f8" | "f8" => Some(Self::F64),
			_ => None,
		}
	}

	fn size(self) -> usize {
		match self {
			Self::F32 => 4,
			Self::F64 => 8,
		}
	}
}

#[derive(Debug, PartialEq, Eq)]
struct Header {
	dtype: Dtype,
	fortran_order: bool,
	shape: Vec<usize>,
}

/// Reads an (N, D) float matrix; `f8` data is narrowed to `f32`.
pub fn read_matrix(path: &Path) -> Result<Array2<f32>, NpyError> {
	let bytes = fs::read(path)?;
	parse_matrix(&bytes)
}

fn parse_matrix(bytes: &[u8]) -> Result<Array2<f32>, NpyError> {
	let (header, data) = split_header(bytes)?;

	let (rows, cols) = match header.shape.as_slice() {
		[rows, cols] => (*rows, *cols),
		other => return Err(NpyError::Format(format!("expected a 2-D array, got shape {:?}", other))),
	};

	let expected = rows
		.checked_mul(cols)
		.and_then(|n| n.checked_mul(header.dtype.size()))
		.ok_or_else(|| NpyError::Format("shape overflows".to_string()))?;
	if data.len() != expected {
		return Err(NpyError::Format(format!(
			"expected {} data bytes for shape ({}, {}), found {}",
			expected,
			rows,
			cols,
			data.len()
		)));
	}

	let values: Vec<f32> = match header.dtype {
		Dtype::F32 => data
			.chunks_exact(4)
			.map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
			.collect(),
		Dtype::F64 => data
			.chunks_exact(8)
			.map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]) as f32)
			.collect(),
	};

	let matrix = Array2::from_shape_vec((rows, cols).set_f(header.fortran_order), values)
		.map_err(|e| NpyError::Format(e.to_string()))?;

	Ok(matrix.as_standard_layout().into_owned())
}

fn split_header(bytes: &[u8]) -> Result<(Header, &[u8]), NpyError> {
	if bytes.len() < 10 || &bytes[..6] != MAGIC {
		return Err(NpyError::Format("missing NUMPY magic".to_string()));
	}

	let major = bytes[6];
	let (header_len, header_start) = match major {
		1 => (usize::from(u16::from_le_bytes([bytes[8], bytes[9]])), 10),
		2 | 3 => {
			if bytes.len() < 12 {
				return Err(NpyError::Format("truncated header".to_string()));
			}
			let len = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
			(len as usize, 12)
		}
		v => return Err(NpyError::Format(format!("unsupported format version {}", v))),
	};

	let data_start = header_start + header_len;
	if bytes.len() < data_start {
		return Err(NpyError::Format("truncated header".to_string()));
	}

	let text = std::str::from_utf8(&bytes[header_start..data_start])
		.map_err(|_| NpyError::Format("header is not valid UTF-8".to_string()))?;

	Ok((parse_header(text)?, &bytes[data_start..]))
}

/// Parses the Python dict literal, e.g.
/// `{'descr': '<f4', 'fortran_order': False, 'shape': (3, 384), }`
fn parse_header(text: &str) -> Result<Header, NpyError> {
	let descr = dict_value(text, "descr")
		.map(|v| v.trim_matches(|c| c == '\'' || c == '"'))
		.ok_or_else(|| NpyError::Format("header has no 'descr'".to_string()))?;
	let dtype = Dtype::parse(descr)
		.ok_or_else(|| NpyError::Format(format!("unsupported dtype '{}', expected <f4 or <f8", descr)))?;

	let fortran_order = match dict_value(text, "fortran_order") {
		Some("True") => true,
		Some("False") => false,
		_ => return Err(NpyError::Format("header has no valid 'fortran_order'".to_string())),
	};

	let shape_text = dict_value(text, "shape")
		.and_then(|v| v.strip_prefix('('))
		.and_then(|v| v.strip_suffix(')'))
		.ok_or_else(|| NpyError::Format("header has no 'shape' tuple".to_string()))?;
	let shape = shape_text
		.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(|s| s.parse::<usize>())
		.collect::<Result<Vec<_>, _>>()
		.map_err(|_| NpyError::Format(format!("invalid shape ({})", shape_text)))?;

	Ok(Header { dtype, fortran_order, shape })
}

/// Raw text of a value in the header dict. Tuples are returned with parens.
fn dict_value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
	let needle_single = format!("'{}'", key);
	let needle_double = format!("\"{}\"", key);
	let start = text
		.find(&needle_single)
		.map(|i| i + needle_single.len())
		.or_else(|| text.find(&needle_double).map(|i| i + needle_double.len()))?;

	let rest = text[start..].trim_start().strip_prefix(':')?.trim_start();
	let end = if rest.starts_with('(') {
		rest.find(')')? + 1
	} else {
		rest.find([',', '}']).unwrap_or(rest.len())
	};

	Some(rest[..end].trim())
}

/// Writes a C-order little-endian `f4` matrix in format version 1.0.
pub fn write_matrix(path: &Path, matrix: &Array2<f32>) -> io::Result<()> {
	if let Some(parent) = path.parent() {
		if !parent.as_os_str().is_empty() {
			fs::create_dir_all(parent)?;
		}
	}

	let mut file = io::BufWriter::new(fs::File::create(path)?);
	file.write_all(&encode_header(matrix.nrows(), matrix.ncols()))?;
	for value in matrix.iter() {
		file.write_all(&value.to_le_bytes())?;
	}
	file.flush()
}

fn encode_header(rows: usize, cols: usize) -> Vec<u8> {
	let mut dict = format!(
		"{{'descr': '<f4', 'fortran_order': False, 'shape': ({}, {}), }}",
		rows, cols
	);
	// magic + version + u16 length + dict + '\n' must be a multiple of 64
	let unpadded = MAGIC.len() + 2 + 2 + dict.len() + 1;
	let padding = (ALIGNMENT - unpadded % ALIGNMENT) % ALIGNMENT;
	dict.extend(std::iter::repeat(' ').take(padding));
	dict.push('\n');

	let mut out = Vec::with_capacity(unpadded + padding);
	out.extend_from_slice(MAGIC);
	out.extend_from_slice(&[1, 0]);
	out.extend_from_slice(&(dict.len() as u16).to_le_bytes());
	out.extend_from_slice(dict.as_bytes());
	out
}
