// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Directive dispatcher: keyword matching and per-directive argument grammars

use super::lexer::{self, Cursor, Line};
use crate::ast::{Directive, Keyword, TransformOp};
use crate::config::InterpreterConfig;
use crate::error::{RwxError, RwxResult};
use crate::geometry::{Color, Primitive, Vertex};
use crate::utils::math::matrix_from_rows;
use nalgebra::{Point2, Point3, Vector3};

/// Directive table with the shortest accepted abbreviation of each name
const KEYWORDS: &[(Keyword, usize)] = &[
    (Keyword::ModelBegin, 6),
    (Keyword::ModelEnd, 6),
    (Keyword::ClumpBegin, 6),
    (Keyword::ClumpEnd, 6),
    (Keyword::ProtoBegin, 6),
    (Keyword::ProtoEnd, 6),
    (Keyword::ProtoInstance, 13),
    (Keyword::ProtoInstanceGeometry, 14),
    (Keyword::Vertex, 4),
    (Keyword::Triangle, 4),
    (Keyword::Quad, 4),
    (Keyword::Polygon, 4),
    (Keyword::Block, 5),
    (Keyword::Cone, 4),
    (Keyword::Cylinder, 4),
    (Keyword::Disc, 4),
    (Keyword::Hemisphere, 4),
    (Keyword::Sphere, 4),
    (Keyword::Identity, 5),
    (Keyword::Translate, 6),
    (Keyword::Rotate, 3),
    (Keyword::Scale, 4),
    (Keyword::Transform, 9),
    (Keyword::TransformBegin, 10),
    (Keyword::TransformEnd, 10),
    (Keyword::TransformJoint, 10),
    (Keyword::Ambient, 3),
    (Keyword::Diffuse, 4),
    (Keyword::Specular, 4),
    (Keyword::Color, 4),
    (Keyword::Surface, 4),
    (Keyword::Opacity, 4),
    (Keyword::Texture, 7),
    (Keyword::MaterialBegin, 9),
    (Keyword::MaterialEnd, 9),
    (Keyword::AddMaterialMode, 15),
    (Keyword::RemoveMaterialMode, 18),
    (Keyword::MaterialMode, 12),
    (Keyword::MaterialModes, 13),
    (Keyword::AddTextureMode, 14),
    (Keyword::RemoveTextureMode, 17),
    (Keyword::TextureMode, 11),
    (Keyword::TextureModes, 12),
    (Keyword::TextureAddressMode, 18),
    (Keyword::TextureMipmapState, 18),
    (Keyword::TextureDithering, 16),
    (Keyword::TextureGammaCorrection, 22),
    (Keyword::GeometrySampling, 16),
    (Keyword::LightSampling, 13),
    (Keyword::AxisAlignment, 13),
    (Keyword::Collision, 4),
    (Keyword::Hints, 5),
    (Keyword::AddHint, 7),
    (Keyword::RemoveHint, 10),
    (Keyword::Trace, 5),
    (Keyword::Tag, 3),
    (Keyword::Include, 7),
    (Keyword::IncludeGeometry, 8),
];

/// Result of dispatching one line
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Directive {
        directive: Directive,
        /// Words left over after the directive's grammar was satisfied
        trailing: Vec<String>,
    },
    /// Leading word matched no directive
    Unrecognized(String),
}

/// Match a directive name, ignoring case.
///
/// An exact name always wins. Otherwise, with `allow_abbreviations`, the word
/// must be a prefix of exactly one name and at least that name's minimum length.
pub fn lookup_keyword(word: &str, allow_abbreviations: bool) -> Option<Keyword> {
    let word = word.to_ascii_lowercase();

    if let Some((keyword, _)) = KEYWORDS.iter().find(|(k, _)| k.name() == word) {
        return Some(*keyword);
    }
    if !allow_abbreviations {
        return None;
    }

    let mut candidates = KEYWORDS
        .iter()
        .filter(|(k, min_len)| word.len() >= *min_len && k.name().starts_with(&word));
    match (candidates.next(), candidates.next()) {
        (Some((keyword, _)), None) => Some(*keyword),
        _ => None,
    }
}

/// Parse a whole buffer into numbered directives without interpreting them
pub fn parse_rwx(source: &str, config: &InterpreterConfig) -> RwxResult<Vec<(usize, ParsedLine)>> {
    lexer::lines(source)?
        .map(|line| parse_line(&line, config).map(|parsed| (line.number, parsed)))
        .collect()
}

/// Dispatch one lexed line to its argument grammar
pub fn parse_line(line: &Line<'_>, config: &InterpreterConfig) -> RwxResult<ParsedLine> {
    let Some(keyword) = lookup_keyword(line.keyword(), config.allow_abbreviations) else {
        return Ok(ParsedLine::Unrecognized(line.keyword().to_string()));
    };

    let mut cursor = Cursor::new(line.number, keyword.name(), line.arguments());
    let directive = parse_arguments(keyword, &mut cursor, config)?;
    let trailing = cursor.read_rest().into_iter().map(str::to_string).collect();

    Ok(ParsedLine::Directive {
        directive,
        trailing,
    })
}

fn parse_arguments(
    keyword: Keyword,
    cursor: &mut Cursor<'_, '_>,
    config: &InterpreterConfig,
) -> RwxResult<Directive> {
    let directive = match keyword {
        Keyword::ModelBegin => Directive::ModelBegin,
        Keyword::ModelEnd => Directive::ModelEnd,
        Keyword::ClumpBegin => Directive::ClumpBegin,
        Keyword::ClumpEnd => Directive::ClumpEnd,
        Keyword::ProtoBegin => Directive::ProtoBegin(cursor.read_word()?.to_string()),
        Keyword::ProtoEnd => Directive::ProtoEnd,
        Keyword::ProtoInstance => Directive::ProtoInstance {
            name: cursor.read_word()?.to_string(),
            geometry_only: false,
        },
        Keyword::ProtoInstanceGeometry => Directive::ProtoInstance {
            name: cursor.read_word()?.to_string(),
            geometry_only: true,
        },

        Keyword::Vertex => Directive::Vertex(parse_vertex(cursor)?),
        Keyword::Triangle => {
            let [a, b, c] = read_indices::<3>(cursor)?;
            Directive::Triangle {
                indices: [a, b, c],
                tag: read_tag(cursor)?,
            }
        }
        Keyword::Quad => {
            let indices = read_indices::<4>(cursor)?;
            let uv = if cursor.eat_keyword("uv") {
                let [u, v] = cursor.read_floats::<2>()?;
                Some(Point2::new(u, v))
            } else {
                None
            };
            Directive::Quad {
                indices,
                uv,
                tag: read_tag(cursor)?,
            }
        }
        Keyword::Polygon => parse_polygon(cursor, config.max_polygon_vertices)?,

        Keyword::Block => {
            let [width, height, depth] = cursor.read_floats::<3>()?;
            Directive::Primitive(Primitive::Block {
                width,
                height,
                depth,
            })
        }
        Keyword::Cone => {
            let [height, radius] = cursor.read_floats::<2>()?;
            Directive::Primitive(Primitive::Cone {
                height,
                radius,
                sides: cursor.read_uint()?,
            })
        }
        Keyword::Cylinder => {
            let [height, bottom_radius, top_radius] = cursor.read_floats::<3>()?;
            Directive::Primitive(Primitive::Cylinder {
                height,
                bottom_radius,
                top_radius,
                sides: cursor.read_uint()?,
            })
        }
        Keyword::Disc => {
            let [offset, radius] = cursor.read_floats::<2>()?;
            Directive::Primitive(Primitive::Disc {
                offset,
                radius,
                sides: cursor.read_uint()?,
            })
        }
        Keyword::Hemisphere => Directive::Primitive(Primitive::Hemisphere {
            radius: cursor.read_float()?,
            density: cursor.read_uint()?,
        }),
        Keyword::Sphere => Directive::Primitive(Primitive::Sphere {
            radius: cursor.read_float()?,
            density: cursor.read_uint()?,
        }),

        Keyword::Identity => Directive::Identity,
        Keyword::Translate => {
            Directive::Transform(TransformOp::Translate(read_vector(cursor)?))
        }
        Keyword::Rotate => {
            let axes = read_vector(cursor)?;
            Directive::Transform(TransformOp::Rotate {
                axes,
                degrees: cursor.read_float()?,
            })
        }
        Keyword::Scale => Directive::Transform(TransformOp::Scale(read_vector(cursor)?)),
        Keyword::Transform => {
            Directive::SetTransform(matrix_from_rows(&cursor.read_floats::<16>()?))
        }
        Keyword::TransformBegin => Directive::TransformBegin,
        Keyword::TransformEnd => Directive::TransformEnd,

        Keyword::Ambient => Directive::Ambient(cursor.read_float()?),
        Keyword::Diffuse => Directive::Diffuse(cursor.read_float()?),
        Keyword::Specular => Directive::Specular(cursor.read_float()?),
        Keyword::Color => {
            let [r, g, b] = cursor.read_floats::<3>()?;
            Directive::Color(Color::new(r, g, b))
        }
        Keyword::Surface => {
            let [ambient, diffuse, specular] = cursor.read_floats::<3>()?;
            Directive::Surface {
                ambient,
                diffuse,
                specular,
            }
        }
        Keyword::Opacity => Directive::Opacity(cursor.read_float()?),
        Keyword::Texture => parse_texture(cursor)?,
        Keyword::MaterialBegin => Directive::MaterialBegin,
        Keyword::MaterialEnd => Directive::MaterialEnd,

        inert => Directive::Ignored {
            keyword: inert,
            arguments: read_inert(inert, cursor)?,
        },
    };
    Ok(directive)
}

fn parse_vertex(cursor: &mut Cursor<'_, '_>) -> RwxResult<Vertex> {
    let [x, y, z] = cursor.read_floats::<3>()?;
    let position = Point3::new(x, y, z);

    let vertex = if cursor.eat_keyword("uv") {
        let [u, v] = cursor.read_floats::<2>()?;
        Vertex::with_uv(position, Point2::new(u, v))
    } else {
        Vertex::new(position)
    };

    // vertex colors are not carried
    if cursor.eat_keyword("prelight") {
        cursor.read_floats::<3>()?;
    }
    Ok(vertex)
}

fn parse_polygon(cursor: &mut Cursor<'_, '_>, max: usize) -> RwxResult<Directive> {
    let line = cursor.line();
    let count = cursor.read_uint()? as usize;
    if !(3..=max).contains(&count) {
        return Err(RwxError::PolygonSize { line, count, max });
    }

    let indices = (0..count)
        .map(|_| read_index(cursor))
        .collect::<RwxResult<Vec<_>>>()?;
    Ok(Directive::Polygon {
        indices,
        tag: read_tag(cursor)?,
    })
}

/// `texture NAME [mask NAME] [bump NAME]`, options in either order
fn parse_texture(cursor: &mut Cursor<'_, '_>) -> RwxResult<Directive> {
    let name = cursor.read_word()?;
    let name = (!name.eq_ignore_ascii_case("null")).then(|| name.to_string());

    let mut mask = None;
    let mut bump = None;
    loop {
        if mask.is_none() && cursor.eat_keyword("mask") {
            mask = Some(cursor.read_word()?.to_string());
        } else if bump.is_none() && cursor.eat_keyword("bump") {
            bump = Some(cursor.read_word()?.to_string());
        } else {
            break;
        }
    }

    Ok(Directive::Texture { name, mask, bump })
}

fn read_inert(keyword: Keyword, cursor: &mut Cursor<'_, '_>) -> RwxResult<Vec<String>> {
    let arguments = match keyword {
        Keyword::Tag => vec![cursor.read_uint()?.to_string()],
        Keyword::TransformJoint => cursor
            .read_floats::<16>()?
            .iter()
            .map(f64::to_string)
            .collect(),
        Keyword::AddMaterialMode
        | Keyword::RemoveMaterialMode
        | Keyword::MaterialMode
        | Keyword::AddTextureMode
        | Keyword::RemoveTextureMode
        | Keyword::TextureMode
        | Keyword::TextureAddressMode
        | Keyword::TextureMipmapState
        | Keyword::GeometrySampling
        | Keyword::LightSampling
        | Keyword::AxisAlignment
        | Keyword::Collision => vec![cursor.read_word()?.to_string()],
        // mode lists, hint lists, on/off toggles and include paths
        _ => cursor.read_rest().into_iter().map(str::to_string).collect(),
    };
    Ok(arguments)
}

fn read_vector(cursor: &mut Cursor<'_, '_>) -> RwxResult<Vector3<f64>> {
    let [x, y, z] = cursor.read_floats::<3>()?;
    Ok(Vector3::new(x, y, z))
}

fn read_index(cursor: &mut Cursor<'_, '_>) -> RwxResult<usize> {
    Ok(cursor.read_uint()? as usize)
}

fn read_indices<const N: usize>(cursor: &mut Cursor<'_, '_>) -> RwxResult<[usize; N]> {
    let mut indices = [0; N];
    for index in indices.iter_mut() {
        *index = read_index(cursor)?;
    }
    Ok(indices)
}

fn read_tag(cursor: &mut Cursor<'_, '_>) -> RwxResult<Option<u32>> {
    if cursor.eat_keyword("tag") {
        Ok(Some(cursor.read_uint()?))
    } else {
        Ok(None)
    }
}
