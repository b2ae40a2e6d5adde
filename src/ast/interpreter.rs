// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Streaming interpreter that turns directives into meshes

use super::{Directive, ProtoRegistry, ScopeState};
use crate::config::InterpreterConfig;
use crate::error::{Diagnostic, RwxError, RwxResult, ScopeKind};
use crate::geometry::{Assembler, Mesh, Scene};
use crate::io::lexer;
use crate::io::parser::{self, ParsedLine};
use log::{debug, trace, warn};
use std::mem;

/// Reusable RWX interpreter.
///
/// Holds only immutable settings; every call to [`Interpreter::interpret`]
/// runs a fresh session with its own stacks, buffers and proto registry.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    config: InterpreterConfig,
    source_name: Option<String>,
}

impl Interpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            config,
            source_name: None,
        }
    }

    /// Name used to prefix log messages, usually the file path
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Interpret a whole script. The first fatal error aborts the parse.
    pub fn interpret(&self, source: &str) -> RwxResult<Scene> {
        let mut session = Session::new(&self.config, self.source_name.as_deref());

        for line in lexer::lines(source)? {
            match parser::parse_line(&line, &self.config)? {
                ParsedLine::Directive {
                    directive,
                    trailing,
                } => {
                    if !trailing.is_empty() {
                        session.warn(
                            line.number,
                            format!(
                                "trailing arguments ignored after `{}`: {}",
                                line.keyword(),
                                trailing.join(" ")
                            ),
                        );
                    }
                    session.execute(directive, line.number)?;
                }
                ParsedLine::Unrecognized(word) => {
                    session.warn(line.number, format!("unrecognized directive `{word}`"));
                }
            }
        }

        session.finish()
    }
}

/// Scope state parked by `protobegin` until the matching `protoend`
#[derive(Debug)]
struct SavedScope {
    scope: ScopeState,
    /// Output the enclosing scope was collecting into
    sink: Vec<Mesh>,
    name: String,
    line: usize,
}

/// State of one parse
struct Session<'c> {
    config: &'c InterpreterConfig,
    source_name: Option<&'c str>,
    scope: ScopeState,
    saved: Vec<SavedScope>,
    assembler: Assembler,
    /// Completed meshes of the innermost open proto, or the scene output
    sink: Vec<Mesh>,
    protos: ProtoRegistry,
    diagnostics: Vec<Diagnostic>,
}

impl<'c> Session<'c> {
    fn new(config: &'c InterpreterConfig, source_name: Option<&'c str>) -> Self {
        Self {
            config,
            source_name,
            scope: ScopeState::new(),
            saved: Vec::new(),
            assembler: Assembler::new(),
            sink: Vec::new(),
            protos: ProtoRegistry::new(),
            diagnostics: Vec::new(),
        }
    }

    fn location(&self, line: usize) -> String {
        match self.source_name {
            Some(name) => format!("{name}:{line}"),
            None => format!("line {line}"),
        }
    }

    fn warn(&mut self, line: usize, message: String) {
        warn!("{}: {}", self.location(line), message);
        self.diagnostics.push(Diagnostic::warning(line, message));
    }

    fn execute(&mut self, directive: Directive, line: usize) -> RwxResult<()> {
        let local_vertices = self.config.clump_local_vertices;

        match directive {
            Directive::ModelBegin | Directive::ModelEnd => {}
            Directive::ClumpBegin => {
                self.flush();
                self.scope.open_clump(line, local_vertices);
            }
            Directive::ClumpEnd => {
                self.flush();
                if !self.scope.close_clump(local_vertices) {
                    self.warn(line, "clumpend without matching clumpbegin".to_string());
                }
            }
            Directive::ProtoBegin(name) => self.begin_proto(name, line),
            Directive::ProtoEnd => self.end_proto(line)?,
            Directive::ProtoInstance {
                name,
                geometry_only,
            } => {
                let material = geometry_only.then_some(&self.scope.material);
                let meshes =
                    self.protos
                        .instantiate(&name, &self.scope.transform, material, line)?;
                self.flush();
                self.sink.extend(meshes);
            }

            Directive::Vertex(vertex) => {
                self.scope.add_vertex(vertex);
            }
            Directive::Triangle { indices, tag } => self.emit(&indices, tag, line)?,
            Directive::Quad { indices, uv, tag } => {
                if uv.is_some() {
                    trace!("{}: per-quad uv ignored", self.location(line));
                }
                self.emit(&indices, tag, line)?;
            }
            Directive::Polygon { indices, tag } => self.emit(&indices, tag, line)?,
            Directive::Primitive(primitive) => {
                debug!(
                    "{}: {} primitive not tessellated",
                    self.location(line),
                    primitive.name()
                );
            }

            Directive::Identity => self.scope.reset_transform(),
            Directive::Transform(op) => self.scope.apply(&op),
            Directive::SetTransform(matrix) => self.scope.transform = matrix,
            Directive::TransformBegin => self.scope.push_transform(line),
            Directive::TransformEnd => {
                if !self.scope.pop_transform() {
                    return Err(RwxError::UnbalancedScope {
                        line,
                        scope: ScopeKind::Transform,
                    });
                }
            }

            Directive::Ambient(value) => self.scope.material.ambient = value,
            Directive::Diffuse(value) => self.scope.material.diffuse = value,
            Directive::Specular(value) => self.scope.material.specular = value,
            Directive::Color(color) => self.scope.material.color = color,
            Directive::Surface {
                ambient,
                diffuse,
                specular,
            } => self.scope.material.set_surface(ambient, diffuse, specular),
            Directive::Opacity(value) => self.scope.material.opacity = value,
            Directive::Texture { name, mask, bump } => {
                self.scope.material.texture = name.map(|name| self.config.texture_file(&name));
                if bump.is_some() {
                    self.scope.material.bump = bump;
                }
                if let Some(mask) = mask {
                    trace!("{}: texture mask `{mask}` ignored", self.location(line));
                }
            }
            Directive::MaterialBegin => self.scope.push_material(line),
            Directive::MaterialEnd => {
                if !self.scope.pop_material() {
                    return Err(RwxError::UnbalancedScope {
                        line,
                        scope: ScopeKind::Material,
                    });
                }
            }

            Directive::Ignored { keyword, arguments } => {
                trace!(
                    "{}: `{}` has no effect ({})",
                    self.location(line),
                    keyword.name(),
                    arguments.join(" ")
                );
            }
        }
        Ok(())
    }

    fn emit(&mut self, indices: &[usize], tag: Option<u32>, line: usize) -> RwxResult<()> {
        self.assembler.emit_face(
            &self.scope.vertices,
            indices,
            &self.scope.transform,
            tag,
            line,
        )
    }

    /// Close the pending mesh, if it has faces, into the current sink
    fn flush(&mut self) {
        if let Some(mesh) = self.assembler.finish(&self.scope.material) {
            self.sink.push(mesh);
        }
    }

    fn begin_proto(&mut self, name: String, line: usize) {
        self.flush();
        self.protos.begin_definition(&name);
        self.saved.push(SavedScope {
            scope: mem::take(&mut self.scope),
            sink: mem::take(&mut self.sink),
            name,
            line,
        });
    }

    fn end_proto(&mut self, line: usize) -> RwxResult<()> {
        let Some(saved) = self.saved.pop() else {
            return Err(RwxError::UnbalancedScope {
                line,
                scope: ScopeKind::Proto,
            });
        };
        if let Some((scope, open_line)) = self.scope.unterminated() {
            return Err(RwxError::UnterminatedScope {
                line: open_line,
                scope,
            });
        }
        self.warn_open_clumps();
        self.flush();

        let meshes = mem::replace(&mut self.sink, saved.sink);
        self.scope = saved.scope;
        self.protos.end_definition();

        debug!(
            "{}: proto `{}` defined with {} mesh(es)",
            self.location(line),
            saved.name,
            meshes.len()
        );
        let name = saved.name;
        if self.protos.register(name.clone(), meshes).is_some() {
            let message = format!("proto `{name}` redefined");
            debug!("{}: {}", self.location(line), message);
            self.diagnostics.push(Diagnostic::info(line, message));
        }
        Ok(())
    }

    fn warn_open_clumps(&mut self) {
        let open = self.scope.open_clumps().to_vec();
        for line in open {
            self.warn(line, "clumpbegin is never closed".to_string());
        }
    }

    fn finish(mut self) -> RwxResult<Scene> {
        if let Some(outermost) = self.saved.first() {
            return Err(RwxError::UnterminatedScope {
                line: outermost.line,
                scope: ScopeKind::Proto,
            });
        }
        if let Some((scope, line)) = self.scope.unterminated() {
            return Err(RwxError::UnterminatedScope { line, scope });
        }
        self.warn_open_clumps();
        self.flush();

        Ok(Scene {
            meshes: self.sink,
            diagnostics: self.diagnostics,
        })
    }
}
