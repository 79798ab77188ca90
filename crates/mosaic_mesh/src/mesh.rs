use crate::{MeshError, Result};

use mosaic_core::prelude::*;
use std::path::Path;

/// A polygon referencing mesh vertices and, in parallel, texture coordinates. Indices are 0-based.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    pub vertices: Vec<usize>,
    /// `None` where the source gave no texture coordinate. Those sample at `(0, 0)`.
    pub uvs: Vec<Option<usize>>,
}

impl Face {
    pub fn arity(&self) -> usize {
        self.vertices.len()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point3f>,
    pub uvs: Vec<Point2f>,
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Parses the line-oriented text format:
    ///
    /// ```text
    /// v 0.0 1.0 2.0     # vertex
    /// vt 0.5 0.5        # texture coordinate
    /// f 1/1 2/2 3       # face, 1-based vertex[/uv[/normal]] references
    /// ```
    ///
    /// Any other line is ignored. Negative references count back from the most recent element,
    /// so `-1` is the last vertex defined before the face.
    pub fn parse(text: &str) -> Result<Self> {
        let mut mesh = Mesh::default();

        for (line_index, line) in text.lines().enumerate() {
            let line_number = line_index + 1;
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("v") => {
                    let [x, y, z] = parse_floats::<3>(line_number, tokens)?;
                    mesh.vertices.push(PointN([x, y, z]));
                }
                Some("vt") => {
                    let [u, v] = parse_floats::<2>(line_number, tokens)?;
                    mesh.uvs.push(PointN([u, v]));
                }
                Some("f") => {
                    let face = mesh.parse_face(line_number, tokens)?;
                    mesh.faces.push(face);
                }
                _ => {}
            }
        }

        tracing::debug!(
            vertices = mesh.vertices.len(),
            uvs = mesh.uvs.len(),
            faces = mesh.faces.len(),
            "parsed mesh"
        );

        Ok(mesh)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;

        Self::parse(&text)
    }

    fn parse_face<'a>(
        &self,
        line: usize,
        tokens: impl Iterator<Item = &'a str>,
    ) -> Result<Face> {
        let mut face = Face {
            vertices: Vec::with_capacity(4),
            uvs: Vec::with_capacity(4),
        };
        for token in tokens {
            let mut parts = token.split('/');
            let vertex = parts.next().unwrap_or("");
            face.vertices
                .push(resolve_index(line, vertex, self.vertices.len())?);
            let uv = match parts.next() {
                Some(uv) if !uv.is_empty() => Some(resolve_index(line, uv, self.uvs.len())?),
                _ => None,
            };
            face.uvs.push(uv);
        }

        let arity = face.arity();
        if arity != 3 && arity != 4 {
            return Err(MeshError::UnsupportedFaceArity { line, arity });
        }

        Ok(face)
    }

    /// The position of vertex `i` of `face`.
    #[inline]
    pub fn face_position(&self, face: &Face, i: usize) -> Point3f {
        self.vertices[face.vertices[i]]
    }

    /// The texture coordinate of vertex `i` of `face`, `(0, 0)` if it has none.
    #[inline]
    pub fn face_uv(&self, face: &Face, i: usize) -> Point2f {
        face.uvs[i].map(|uv| self.uvs[uv]).unwrap_or(Point2f::ZERO)
    }
}

fn parse_floats<'a, const N: usize>(
    line: usize,
    tokens: impl Iterator<Item = &'a str>,
) -> Result<[f32; N]> {
    let mut out = [0.0; N];
    let mut found = 0;
    // Extra components (e.g. a vertex weight or a 3D texture coordinate) are ignored.
    for token in tokens.take(N) {
        out[found] = parse_float(line, token)?;
        found += 1;
    }
    if found < N {
        return Err(MeshError::MissingComponent {
            line,
            expected: N,
            found,
        });
    }

    Ok(out)
}

fn parse_float(line: usize, token: &str) -> Result<f32> {
    match token.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(MeshError::InvalidNumber {
            line,
            token: token.to_owned(),
        }),
    }
}

// Converts a 1-based (or negative, relative) reference into a 0-based index into `len` elements.
fn resolve_index(line: usize, token: &str, len: usize) -> Result<usize> {
    let index: i64 = token.parse().map_err(|_| MeshError::InvalidNumber {
        line,
        token: token.to_owned(),
    })?;
    let resolved = if index < 0 {
        len as i64 + index
    } else {
        index - 1
    };
    if resolved < 0 || resolved >= len as i64 {
        return Err(MeshError::IndexOutOfRange { line, index, len });
    }

    Ok(resolved as usize)
}
