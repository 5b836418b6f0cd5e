//! Shader loading
//!
//! The raytracing vertex and fragment shaders are plain WGSL text files
//! supplied at startup. Reading, parsing with naga and GPU compilation each
//! report their own [`ShaderError`] variant so a bad file is easy to spot.

use std::borrow::Cow;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Entry point expected in the vertex shader
pub const VERTEX_ENTRY_POINT: &str = "vs_main";
/// Entry point expected in the fragment shader
pub const FRAGMENT_ENTRY_POINT: &str = "fs_main";

/// Error type for shader operations
#[derive(Debug)]
pub enum ShaderError {
    /// The file could not be read
    Io { path: PathBuf, source: io::Error },
    /// The file contains no source
    Empty(PathBuf),
    /// The source does not declare the required entry point
    MissingEntryPoint { label: String, entry_point: &'static str },
    /// The module failed validation
    Compile { label: String, message: String },
    /// The pipeline combining both stages failed validation
    Link(String),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Io { path, source } => {
                write!(f, "Failed to read shader '{}': {}", path.display(), source)
            }
            ShaderError::Empty(path) => write!(f, "Shader '{}' is empty", path.display()),
            ShaderError::MissingEntryPoint { label, entry_point } => {
                write!(f, "Shader '{}' has no entry point '{}'", label, entry_point)
            }
            ShaderError::Compile { label, message } => {
                write!(f, "Shader '{}' failed to compile: {}", label, message)
            }
            ShaderError::Link(message) => write!(f, "Shader program failed to link: {}", message),
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A vertex + fragment WGSL source pair
#[derive(Clone, Debug)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
    /// Labels used for GPU objects and error messages
    pub vertex_label: String,
    pub fragment_label: String,
}

impl ShaderSources {
    /// Read both shader files from disk
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(vertex_path: P, fragment_path: Q) -> Result<Self, ShaderError> {
        let vertex_path = vertex_path.as_ref();
        let fragment_path = fragment_path.as_ref();

        let sources = Self {
            vertex: read_source(vertex_path)?,
            fragment: read_source(fragment_path)?,
            vertex_label: vertex_path.display().to_string(),
            fragment_label: fragment_path.display().to_string(),
        };
        sources.check_entry_points()?;

        log::info!(
            "Loaded shaders '{}' ({} bytes) and '{}' ({} bytes)",
            sources.vertex_label,
            sources.vertex.len(),
            sources.fragment_label,
            sources.fragment.len()
        );
        Ok(sources)
    }

    /// Build from in-memory sources
    pub fn from_strings(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
            vertex_label: "vertex".to_string(),
            fragment_label: "fragment".to_string(),
        }
    }

    /// Parse both stages and make sure each declares the entry point the
    /// pipeline will call, for the right stage
    pub fn check_entry_points(&self) -> Result<(), ShaderError> {
        check_stage(
            &self.vertex,
            &self.vertex_label,
            VERTEX_ENTRY_POINT,
            naga::ShaderStage::Vertex,
        )?;
        check_stage(
            &self.fragment,
            &self.fragment_label,
            FRAGMENT_ENTRY_POINT,
            naga::ShaderStage::Fragment,
        )
    }
}

fn check_stage(
    source: &str,
    label: &str,
    entry_point: &'static str,
    stage: naga::ShaderStage,
) -> Result<(), ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Compile {
        label: label.to_string(),
        message: e.emit_to_string(source),
    })?;

    let declared = module
        .entry_points
        .iter()
        .any(|ep| ep.name == entry_point && ep.stage == stage);
    if !declared {
        return Err(ShaderError::MissingEntryPoint {
            label: label.to_string(),
            entry_point,
        });
    }
    Ok(())
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if source.trim().is_empty() {
        return Err(ShaderError::Empty(path.to_path_buf()));
    }
    Ok(source)
}

/// Create a shader module, turning validation errors into [`ShaderError::Compile`]
pub fn compile_module(device: &wgpu::Device, label: &str, source: &str) -> Result<wgpu::ShaderModule, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(source)),
    });

    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(ShaderError::Compile {
            label: label.to_string(),
            message: error.to_string(),
        });
    }

    log::debug!("Compiled shader module '{}'", label);
    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Helper to create a temp file with given content, returning its path.
    fn create_temp_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("raydemo_shader_tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    const VERTEX: &str = "@vertex\nfn vs_main(@builtin(vertex_index) i: u32) -> @builtin(position) vec4<f32> {\n    return vec4<f32>(0.0);\n}\n";
    const FRAGMENT: &str = "@fragment\nfn fs_main() -> @location(0) vec4<f32> {\n    return vec4<f32>(1.0);\n}\n";

    #[test]
    fn test_load_pair() {
        let vs = create_temp_file("load_pair.vert.wgsl", VERTEX);
        let fs_path = create_temp_file("load_pair.frag.wgsl", FRAGMENT);

        let sources = ShaderSources::load(&vs, &fs_path).unwrap();
        assert_eq!(sources.vertex, VERTEX);
        assert_eq!(sources.fragment, FRAGMENT);
        assert!(sources.vertex_label.ends_with("load_pair.vert.wgsl"));

        let _ = fs::remove_file(vs);
        let _ = fs::remove_file(fs_path);
    }

    #[test]
    fn test_missing_file() {
        let fs_path = create_temp_file("missing_file.frag.wgsl", FRAGMENT);
        let err = ShaderSources::load("/definitely/not/here.wgsl", &fs_path).unwrap_err();
        assert!(matches!(err, ShaderError::Io { .. }));
        assert!(format!("{}", err).contains("/definitely/not/here.wgsl"));
        assert!(std::error::Error::source(&err).is_some());
        let _ = fs::remove_file(fs_path);
    }

    #[test]
    fn test_empty_file() {
        let vs = create_temp_file("empty.vert.wgsl", "  \n\t\n");
        let fs_path = create_temp_file("empty.frag.wgsl", FRAGMENT);
        let err = ShaderSources::load(&vs, &fs_path).unwrap_err();
        assert!(matches!(err, ShaderError::Empty(_)));
        let _ = fs::remove_file(vs);
        let _ = fs::remove_file(fs_path);
    }

    #[test]
    fn test_swapped_stages_are_rejected() {
        let sources = ShaderSources::from_strings(FRAGMENT, VERTEX);
        match sources.check_entry_points() {
            Err(ShaderError::MissingEntryPoint { entry_point, .. }) => {
                assert_eq!(entry_point, VERTEX_ENTRY_POINT)
            }
            other => panic!("expected missing entry point, got {:?}", other),
        }
    }

    #[test]
    fn test_stage_attribute_on_same_line() {
        let sources = ShaderSources::from_strings(
            "@vertex fn vs_main(@builtin(vertex_index) i: u32) -> @builtin(position) vec4<f32> { return vec4<f32>(0.0); }",
            "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }",
        );
        assert!(sources.check_entry_points().is_ok());
    }

    #[test]
    fn test_commented_out_entry_point_is_rejected() {
        let vertex = format!("/*\n{}*/\nfn helper() {{}}\n", VERTEX);
        let sources = ShaderSources::from_strings(vertex, FRAGMENT);
        assert!(matches!(
            sources.check_entry_points(),
            Err(ShaderError::MissingEntryPoint { entry_point: VERTEX_ENTRY_POINT, .. })
        ));
    }

    #[test]
    fn test_plain_function_is_not_an_entry_point() {
        let vertex = "fn vs_main() -> vec4<f32> { return vec4<f32>(0.0); }";
        let sources = ShaderSources::from_strings(vertex, FRAGMENT);
        assert!(matches!(
            sources.check_entry_points(),
            Err(ShaderError::MissingEntryPoint { .. })
        ));
    }

    #[test]
    fn test_parse_error_reports_label() {
        let sources = ShaderSources::from_strings("@vertex fn vs_main( {", FRAGMENT);
        match sources.check_entry_points() {
            Err(ShaderError::Compile { label, .. }) => assert_eq!(label, "vertex"),
            other => panic!("expected compile error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_display() {
        let err = ShaderError::Compile {
            label: "frag".to_string(),
            message: "unknown type".to_string(),
        };
        assert_eq!(format!("{}", err), "Shader 'frag' failed to compile: unknown type");
        assert!(format!("{}", ShaderError::Link("bad binding".into())).contains("link"));
    }
}
