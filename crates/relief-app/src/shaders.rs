//! Shader sources looked up by name.
//!
//! A shader directory holds `<name>.vert` / `<name>.frag` pairs. Compilation
//! belongs to the rendering collaborator; this module only gathers the text
//! and checks the interface the viewer relies on.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use relief_core::constants::{
    ATTRIBUTE_NORMAL, ATTRIBUTE_POSITION, FRAGMENT_SHADER_EXTENSION, UNIFORM_TR_MATRIX,
    VERTEX_SHADER_EXTENSION,
};
use relief_core::error::{ReliefError, ReliefResult, ShaderStage};

/// Vertex and fragment source of one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    /// Check the vertex stage declares `tr_matrix` and the position/normal
    /// attributes the terrain mesh provides.
    pub fn check_interface(&self, name: &str) -> ReliefResult<()> {
        if !declares(&self.vertex, "uniform", UNIFORM_TR_MATRIX) {
            return Err(ReliefError::shader_compile(
                name,
                format!("vertex stage does not declare uniform '{UNIFORM_TR_MATRIX}'"),
            ));
        }
        for attribute in [ATTRIBUTE_POSITION, ATTRIBUTE_NORMAL] {
            if !declares(&self.vertex, "in", attribute) {
                return Err(ReliefError::shader_compile(
                    name,
                    format!("vertex stage does not declare input '{attribute}'"),
                ));
            }
        }
        Ok(())
    }

    /// Whether either stage declares a uniform called `uniform`.
    pub fn declares_uniform(&self, uniform: &str) -> bool {
        declares(&self.vertex, "uniform", uniform) || declares(&self.fragment, "uniform", uniform)
    }
}

/// True when some `;`-terminated declaration contains both `qualifier` and
/// `ident` as whole tokens.
fn declares(source: &str, qualifier: &str, ident: &str) -> bool {
    source
        .split(';')
        .map(strip_comments)
        .any(|statement| {
            let tokens: Vec<&str> = statement
                .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .filter(|t| !t.is_empty())
                .collect();
            tokens.contains(&qualifier) && tokens.contains(&ident)
        })
}

fn strip_comments(statement: &str) -> String {
    statement
        .lines()
        .map(|line| line.split("//").next().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}

/// All complete shader programs found in a directory.
#[derive(Debug, Clone, Default)]
pub struct ShaderLibrary {
    programs: BTreeMap<String, ShaderSource>,
}

impl ShaderLibrary {
    /// Read every `.vert` / `.frag` file in `dir`, grouped by file stem.
    ///
    /// Fails if any stem lacks one of the two stages.
    pub fn load(dir: &Path) -> ReliefResult<Self> {
        let mut stages = Vec::new();
        let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
        entries.sort_by_key(|e| e.path());

        for entry in entries {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let stem = path.file_stem().and_then(|s| s.to_str());
            let ext = path.extension().and_then(|s| s.to_str());
            let stage = match ext {
                Some(VERTEX_SHADER_EXTENSION) => ShaderStage::Vertex,
                Some(FRAGMENT_SHADER_EXTENSION) => ShaderStage::Fragment,
                _ => {
                    log::warn!("Ignoring non-shader file {}", path.display());
                    continue;
                }
            };
            let Some(stem) = stem else {
                log::warn!("Ignoring shader with non UTF-8 name {}", path.display());
                continue;
            };
            stages.push((stem.to_string(), stage, fs::read_to_string(&path)?));
        }

        let library = Self::from_stages(stages)?;
        log::info!(
            "Loaded {} shader program(s) from {}: {}",
            library.programs.len(),
            dir.display(),
            library.names().collect::<Vec<_>>().join(", ")
        );
        Ok(library)
    }

    /// Assemble programs from `(name, stage, source)` triples.
    pub fn from_stages(
        stages: impl IntoIterator<Item = (String, ShaderStage, String)>,
    ) -> ReliefResult<Self> {
        let mut partial: BTreeMap<String, (Option<String>, Option<String>)> = BTreeMap::new();
        for (name, stage, text) in stages {
            let entry = partial.entry(name).or_default();
            match stage {
                ShaderStage::Vertex => entry.0 = Some(text),
                ShaderStage::Fragment => entry.1 = Some(text),
            }
        }

        let mut programs = BTreeMap::new();
        for (name, (vertex, fragment)) in partial {
            let Some(vertex) = vertex else {
                return Err(ReliefError::MissingShaderStage {
                    name,
                    stage: ShaderStage::Vertex,
                });
            };
            let Some(fragment) = fragment else {
                return Err(ReliefError::MissingShaderStage {
                    name,
                    stage: ShaderStage::Fragment,
                });
            };
            programs.insert(name, ShaderSource { vertex, fragment });
        }
        Ok(Self { programs })
    }

    pub fn get(&self, name: &str) -> ReliefResult<&ShaderSource> {
        self.programs
            .get(name)
            .ok_or_else(|| ReliefError::UnknownShader { name: name.into() })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.programs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{FRAGMENT, VERTEX};
    use super::*;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "relief_shaders_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_pairs_by_stem() {
        let dir = temp_dir("pairs");
        fs::write(dir.join("terrain.vert"), VERTEX).unwrap();
        fs::write(dir.join("terrain.frag"), FRAGMENT).unwrap();
        fs::write(dir.join("flat.vert"), VERTEX).unwrap();
        fs::write(dir.join("flat.frag"), FRAGMENT).unwrap();
        fs::write(dir.join("README.md"), "notes").unwrap();

        let library = ShaderLibrary::load(&dir).unwrap();
        assert_eq!(library.names().collect::<Vec<_>>(), vec!["flat", "terrain"]);
        let terrain = library.get("terrain").unwrap();
        assert_eq!(terrain.vertex, VERTEX);
        assert_eq!(terrain.fragment, FRAGMENT);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_fragment_stage() {
        let dir = temp_dir("missing");
        fs::write(dir.join("terrain.vert"), VERTEX).unwrap();

        let err = ShaderLibrary::load(&dir).unwrap_err();
        match err {
            ReliefError::MissingShaderStage { name, stage } => {
                assert_eq!(name, "terrain");
                assert_eq!(stage, ShaderStage::Fragment);
            }
            other => panic!("expected MissingShaderStage, got {other:?}"),
        }

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_vertex_stage() {
        let err = ShaderLibrary::from_stages(vec![(
            "water".to_string(),
            ShaderStage::Fragment,
            FRAGMENT.to_string(),
        )])
        .unwrap_err();
        assert!(matches!(
            err,
            ReliefError::MissingShaderStage {
                stage: ShaderStage::Vertex,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_directory() {
        let err = ShaderLibrary::load(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, ReliefError::Io(_)));
    }

    #[test]
    fn test_unknown_shader() {
        let library = ShaderLibrary::default();
        assert!(library.is_empty());
        assert!(matches!(
            library.get("terrain"),
            Err(ReliefError::UnknownShader { .. })
        ));
    }

    #[test]
    fn test_interface_check() {
        let good = ShaderSource {
            vertex: VERTEX.into(),
            fragment: FRAGMENT.into(),
        };
        assert!(good.check_interface("terrain").is_ok());
        assert!(good.declares_uniform("obj_color"));
        assert!(!good.declares_uniform("water_color"));

        let no_matrix = ShaderSource {
            vertex: VERTEX.replace("uniform mat4 tr_matrix;", "// uniform mat4 tr_matrix;"),
            fragment: FRAGMENT.into(),
        };
        assert!(matches!(
            no_matrix.check_interface("terrain"),
            Err(ReliefError::ShaderCompile { .. })
        ));

        let no_normal = ShaderSource {
            vertex: VERTEX.replace("in vec3 in_normal;", ""),
            fragment: FRAGMENT.into(),
        };
        assert!(no_normal.check_interface("terrain").is_err());
    }
}
