//! Name-based lookup of vertex attributes and uniforms declared in WGSL.
//!
//! WGSL fixes attribute locations and uniform bindings in the source, so the
//! interface is read from the parsed module rather than queried from a linked
//! program. A missing name is an error and aborts renderer setup.

use fnv::FnvHashMap;
use naga::front::wgsl;
use naga::{AddressSpace, Binding, Module, ShaderStage, TypeInner};
use smallvec::SmallVec;
use thiserror::Error;

pub const POSITION_ATTRIBUTE: &str = "a_position";
pub const COLOR_ATTRIBUTE: &str = "a_color";
pub const VIEW_PROJECTION_UNIFORM: &str = "u_view_projection";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShaderError {
    #[error("failed to parse shader: {0}")]
    Parse(String),
    #[error("failed to find attribute '{0}'")]
    MissingAttribute(String),
    #[error("failed to find uniform '{0}'")]
    MissingUniform(String),
    #[error("attribute at location {location} has unsupported component count {components}")]
    UnsupportedComponentCount { location: u32, components: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformBinding {
    pub group: u32,
    pub binding: u32,
}

#[derive(Clone, Debug, Default)]
pub struct ShaderInterface {
    attributes: FnvHashMap<String, u32>,
    uniforms: FnvHashMap<String, UniformBinding>,
}

impl ShaderInterface {
    /// Parse WGSL and collect the vertex stage inputs bound with
    /// `@location` plus every `var<uniform>` with its group and binding.
    pub fn parse(source: &str) -> Result<Self, ShaderError> {
        let module = wgsl::parse_str(source)
            .map_err(|e| ShaderError::Parse(e.emit_to_string(source)))?;
        Ok(Self::from_module(&module))
    }

    pub fn from_module(module: &Module) -> Self {
        let mut interface = ShaderInterface::default();
        for entry in module
            .entry_points
            .iter()
            .filter(|e| e.stage == ShaderStage::Vertex)
        {
            for arg in &entry.function.arguments {
                // Inputs are either bare `@location` arguments or a struct of them
                match (&arg.binding, &module.types[arg.ty].inner) {
                    (Some(binding), _) => interface.insert_attribute(arg.name.as_deref(), binding),
                    (None, TypeInner::Struct { members, .. }) => {
                        for member in members {
                            if let Some(binding) = &member.binding {
                                interface.insert_attribute(member.name.as_deref(), binding);
                            }
                        }
                    }
                    (None, _) => {}
                }
            }
        }
        for (_, var) in module.global_variables.iter() {
            if var.space != AddressSpace::Uniform {
                continue;
            }
            if let (Some(name), Some(rb)) = (&var.name, &var.binding) {
                interface.uniforms.insert(
                    name.clone(),
                    UniformBinding {
                        group: rb.group,
                        binding: rb.binding,
                    },
                );
            }
        }
        interface
    }

    fn insert_attribute(&mut self, name: Option<&str>, binding: &Binding) {
        if let (Some(name), Binding::Location { location, .. }) = (name, binding) {
            self.attributes.insert(name.to_string(), *location);
        }
    }

    pub fn attribute_location(&self, name: &str) -> Result<u32, ShaderError> {
        self.attributes
            .get(name)
            .copied()
            .ok_or_else(|| ShaderError::MissingAttribute(name.to_string()))
    }

    pub fn uniform_binding(&self, name: &str) -> Result<UniformBinding, ShaderError> {
        self.uniforms
            .get(name)
            .copied()
            .ok_or_else(|| ShaderError::MissingUniform(name.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: u32,
    pub offset: u64,
}

/// Interleaved `f32` vertex layout; offsets and stride accumulate as
/// attributes are added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: SmallVec<[VertexAttribute; 4]>,
    stride: u64,
}

impl VertexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, location: u32, components: u32) -> Result<Self, ShaderError> {
        if !(1..=4).contains(&components) {
            return Err(ShaderError::UnsupportedComponentCount {
                location,
                components,
            });
        }
        self.attributes.push(VertexAttribute {
            location,
            components,
            offset: self.stride,
        });
        self.stride += components as u64 * std::mem::size_of::<f32>() as u64;
        Ok(self)
    }

    /// Position (3) + color (3) layout matching [`crate::Vertex`].
    pub fn scene(interface: &ShaderInterface) -> Result<Self, ShaderError> {
        VertexLayout::new()
            .with_attribute(interface.attribute_location(POSITION_ATTRIBUTE)?, 3)?
            .with_attribute(interface.attribute_location(COLOR_ATTRIBUTE)?, 3)
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }
}
