//! fx module generation
//!
//! Turns an analysed package into a Go source file declaring one
//! `go.uber.org/fx` module per providable type and per bindable interface,
//! plus an aggregate `Module()`.
//!
//! By default the file joins the analysed package and references its
//! constructors by bare name. A qualified file lives in its own package,
//! imports the analysed one and prefixes every reference with its name.

use autofx_analyzer::{AnalyzerError, AnalyzerResult, GenerateSettings, Package};
use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One provided constructor: `constructor` builds `implement_type`.
///
/// For interface modules `implement_type` is the interface the constructor's
/// result is exposed as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleBinding {
    pub constructor: String,
    pub implement_type: String,
    pub package: Option<String>,
}

impl ModuleBinding {
    fn qualified(&self, name: &str) -> String {
        match &self.package {
            Some(package) => format!("{package}.{name}"),
            None => name.to_string(),
        }
    }

    pub fn constructor_ref(&self) -> String {
        self.qualified(&self.constructor)
    }

    pub fn type_ref(&self) -> String {
        self.qualified(&self.implement_type)
    }

    pub fn module_name(&self) -> String {
        format!("{}Module", self.implement_type)
    }
}

/// Everything the generated file provides, in output order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModulePlan {
    pub package_name: String,
    pub package_import: Option<PackageImport>,
    pub provides: Vec<ModuleBinding>,
    pub interfaces: Vec<ModuleBinding>,
}

impl ModulePlan {
    pub fn is_empty(&self) -> bool {
        self.provides.is_empty() && self.interfaces.is_empty()
    }

    pub fn module_names(&self) -> impl Iterator<Item = String> + '_ {
        self.provides
            .iter()
            .chain(&self.interfaces)
            .map(ModuleBinding::module_name)
    }
}

/// How a qualified module file reaches the analysed package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageImport {
    pub alias: String,
    pub path: String,
}

pub struct Generator<'a> {
    package: &'a Package,
    target: Option<(String, PackageImport)>,
}

impl<'a> Generator<'a> {
    /// Generate into the analysed package itself, with bare references
    pub fn new(package: &'a Package) -> Self {
        Self { package, target: None }
    }

    /// Generate into package `target_package`, which imports the analysed
    /// package from `import_path` and qualifies every reference with its name
    pub fn qualified(
        package: &'a Package,
        target_package: impl Into<String>,
        import_path: impl Into<String>,
    ) -> AnalyzerResult<Self> {
        let target_package = target_package.into();
        if target_package == package.name {
            return Err(AnalyzerError::render(format!(
                "a qualified module file cannot be in package {target_package}, the package it imports"
            )));
        }

        let import = PackageImport {
            alias: package.name.clone(),
            path: import_path.into(),
        };
        Ok(Self {
            package,
            target: Some((target_package, import)),
        })
    }

    pub fn from_settings(package: &'a Package, settings: &GenerateSettings) -> AnalyzerResult<Self> {
        if !settings.qualify_package {
            return Ok(Self::new(package));
        }

        let import_path = settings.import_path.as_deref().ok_or_else(|| {
            AnalyzerError::render("qualify_package needs the import_path of the analysed package")
        })?;
        let target_package = settings
            .target_package
            .clone()
            .unwrap_or_else(|| format!("{}fx", package.name));
        Self::qualified(package, target_package, import_path)
    }

    fn qualifier(&self) -> Option<String> {
        self.target.as_ref().map(|(_, import)| import.alias.clone())
    }

    /// Derive the bindings from the package model
    pub fn plan(&self) -> AnalyzerResult<ModulePlan> {
        let mut plan = match &self.target {
            Some((target_package, import)) => ModulePlan {
                package_name: target_package.clone(),
                package_import: Some(import.clone()),
                ..ModulePlan::default()
            },
            None => ModulePlan {
                package_name: self.package.name.clone(),
                ..ModulePlan::default()
            },
        };

        for concrete in self.package.concrete_types() {
            let Some(constructor) = concrete.constructor() else {
                debug!(name = %concrete.name, "no constructor, no module");
                continue;
            };
            if !constructor.signature.params.is_empty() {
                debug!(
                    name = %concrete.name,
                    constructor = %constructor.name,
                    "constructor has dependencies, provided through interface modules only"
                );
                continue;
            }
            plan.provides.push(ModuleBinding {
                constructor: constructor.name.clone(),
                implement_type: concrete.name.clone(),
                package: self.qualifier(),
            });
        }

        for interface in self.package.interfaces() {
            let mut constructors = Vec::new();
            for implementer in interface.implementations() {
                let concrete = self.package.concrete_type(implementer).ok_or_else(|| {
                    AnalyzerError::render(format!(
                        "{} lists unknown implementer {implementer}",
                        interface.name
                    ))
                })?;
                if let Some(constructor) = concrete.constructor() {
                    constructors.push((implementer.as_str(), constructor.name.as_str()));
                }
            }

            let Some((implementer, constructor)) = constructors.first() else {
                debug!(interface = %interface.name, "no constructible implementer");
                continue;
            };
            if constructors.len() > 1 {
                warn!(
                    interface = %interface.name,
                    chosen = %implementer,
                    candidates = constructors.len(),
                    "several implementers can be provided, using the first by name"
                );
            }

            plan.interfaces.push(ModuleBinding {
                constructor: constructor.to_string(),
                implement_type: interface.name.clone(),
                package: self.qualifier(),
            });
        }

        Ok(plan)
    }

    /// Render the Go source of the module file
    pub fn render(&self) -> AnalyzerResult<String> {
        let plan = self.plan()?;
        render_plan(&plan).map_err(|e| AnalyzerError::render(format!("Failed to format module file: {e}")))
    }

    /// Render and write the module file, returning where it went.
    ///
    /// A qualified file declares a different package, so it may not be
    /// written into the analysed package's directory.
    pub fn write_to(&self, path: &Path) -> AnalyzerResult<PathBuf> {
        if self.target.is_some() && is_package_directory(path, Path::new(&self.package.path)) {
            return Err(AnalyzerError::render(format!(
                "{} is inside package {}; a qualified module file needs its own directory",
                path.display(),
                self.package.name
            )));
        }

        let source = self.render()?;
        fs::write(path, source)
            .map_err(|e| AnalyzerError::render(format!("Failed to write {}: {e}", path.display())))?;
        info!(path = %path.display(), "wrote module file");
        Ok(path.to_path_buf())
    }
}

fn is_package_directory(path: &Path, package_dir: &Path) -> bool {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), fs::canonicalize(package_dir)) {
        (Ok(parent), Ok(package_dir)) => parent == package_dir,
        _ => false,
    }
}

pub fn render_plan(plan: &ModulePlan) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "// Code generated by autofx. DO NOT EDIT.")?;
    writeln!(out)?;
    writeln!(out, "package {}", plan.package_name)?;
    writeln!(out)?;
    match &plan.package_import {
        None => writeln!(out, "import \"go.uber.org/fx\"")?,
        Some(import) => {
            writeln!(out, "import (")?;
            writeln!(out, "\t\"go.uber.org/fx\"")?;
            writeln!(out)?;
            writeln!(out, "\t{} \"{}\"", import.alias, import.path)?;
            writeln!(out, ")")?;
        }
    }

    for binding in &plan.provides {
        writeln!(out)?;
        writeln!(out, "func {}() fx.Option {{", binding.module_name())?;
        writeln!(out, "\treturn fx.Options(")?;
        writeln!(out, "\t\tfx.Provide(")?;
        writeln!(out, "\t\t\t{},", binding.constructor_ref())?;
        writeln!(out, "\t\t),")?;
        writeln!(out, "\t)")?;
        writeln!(out, "}}")?;
    }

    for binding in &plan.interfaces {
        writeln!(out)?;
        writeln!(out, "func {}() fx.Option {{", binding.module_name())?;
        writeln!(out, "\treturn fx.Options(")?;
        writeln!(out, "\t\tfx.Provide(")?;
        writeln!(out, "\t\t\tfx.Annotate(")?;
        writeln!(out, "\t\t\t\t{},", binding.constructor_ref())?;
        writeln!(out, "\t\t\t\tfx.As(new({})),", binding.type_ref())?;
        writeln!(out, "\t\t\t),")?;
        writeln!(out, "\t\t),")?;
        writeln!(out, "\t)")?;
        writeln!(out, "}}")?;
    }

    writeln!(out)?;
    writeln!(out, "func Module() fx.Option {{")?;
    if plan.is_empty() {
        writeln!(out, "\treturn fx.Options()")?;
    } else {
        writeln!(out, "\treturn fx.Options(")?;
        for module in plan.module_names() {
            writeln!(out, "\t\t{module}(),")?;
        }
        writeln!(out, "\t)")?;
    }
    writeln!(out, "}}")?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofx_analyzer::{inspect_declarations, Package};
    use autofx_parser::{parse_source, DeclarationSet, ImportDecl};
    use pretty_assertions::assert_eq;

    const SOURCE: &str = r#"package example

type Store interface {
	Get(id string) (string, error)
}

type UserDB struct{}

func NewUserDB() *UserDB { return &UserDB{} }

func (u *UserDB) Get(id string) (string, error) { return "", nil }

type Service struct{ db Store }

func NewService(db Store) *Service { return &Service{db: db} }
"#;

    fn example() -> Package {
        let mut declarations = DeclarationSet::default();
        declarations.add_file(parse_source(SOURCE).unwrap());
        inspect_declarations(declarations, "./example")
    }

    #[test]
    fn test_plan_skips_constructors_with_dependencies() {
        let package = example();
        let plan = Generator::new(&package).plan().unwrap();

        assert_eq!(
            plan.provides,
            vec![ModuleBinding {
                constructor: "NewUserDB".to_string(),
                implement_type: "UserDB".to_string(),
                package: None,
            }]
        );
        assert_eq!(
            plan.interfaces,
            vec![ModuleBinding {
                constructor: "NewUserDB".to_string(),
                implement_type: "Store".to_string(),
                package: None,
            }]
        );
    }

    #[test]
    fn test_rendered_module_file() {
        let package = example();
        let source = Generator::new(&package).render().unwrap();

        let expected = "\
// Code generated by autofx. DO NOT EDIT.

package example

import \"go.uber.org/fx\"

func UserDBModule() fx.Option {
\treturn fx.Options(
\t\tfx.Provide(
\t\t\tNewUserDB,
\t\t),
\t)
}

func StoreModule() fx.Option {
\treturn fx.Options(
\t\tfx.Provide(
\t\t\tfx.Annotate(
\t\t\t\tNewUserDB,
\t\t\t\tfx.As(new(Store)),
\t\t\t),
\t\t),
\t)
}

func Module() fx.Option {
\treturn fx.Options(
\t\tUserDBModule(),
\t\tStoreModule(),
\t)
}
";
        assert_eq!(source, expected);
    }

    fn qualified_settings() -> GenerateSettings {
        GenerateSettings {
            qualify_package: true,
            import_path: Some("github.com/acme/app/example".to_string()),
            ..GenerateSettings::default()
        }
    }

    #[test]
    fn test_qualified_file_imports_the_package_it_references() {
        let package = example();
        let source = Generator::from_settings(&package, &qualified_settings())
            .unwrap()
            .render()
            .unwrap();

        assert!(source.contains("\t\t\texample.NewUserDB,\n"));
        assert!(source.contains("fx.As(new(example.Store))"));

        let file = parse_source(&source).unwrap();
        assert_eq!(file.package_name, "examplefx");
        assert_eq!(
            file.imports,
            vec![
                ImportDecl {
                    alias: None,
                    path: "go.uber.org/fx".to_string()
                },
                ImportDecl {
                    alias: Some("example".to_string()),
                    path: "github.com/acme/app/example".to_string()
                },
            ]
        );
        let names: Vec<&str> = file.callables.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["UserDBModule", "StoreModule", "Module"]);
    }

    #[test]
    fn test_target_package_can_be_named() {
        let package = example();
        let settings = GenerateSettings {
            target_package: Some("wiring".to_string()),
            ..qualified_settings()
        };

        let plan = Generator::from_settings(&package, &settings).unwrap().plan().unwrap();

        assert_eq!(plan.package_name, "wiring");
        assert_eq!(plan.provides[0].constructor_ref(), "example.NewUserDB");
        assert_eq!(plan.interfaces[0].type_ref(), "example.Store");
    }

    #[test]
    fn test_qualifying_without_import_path_is_refused() {
        let package = example();
        let settings = GenerateSettings {
            import_path: None,
            ..qualified_settings()
        };

        let error = Generator::from_settings(&package, &settings).err().unwrap();
        assert!(matches!(error, AnalyzerError::RenderFailure { .. }));
    }

    #[test]
    fn test_qualified_file_cannot_share_the_package_name() {
        let package = example();

        let error = Generator::qualified(&package, "example", "github.com/acme/app/example")
            .err()
            .unwrap();
        assert!(matches!(error, AnalyzerError::RenderFailure { .. }));
    }

    #[test]
    fn test_qualified_file_is_not_written_into_the_package() {
        let root = tempfile::tempdir().unwrap();
        let package_dir = root.path().join("example");
        std::fs::create_dir(&package_dir).unwrap();
        let mut declarations = DeclarationSet::default();
        declarations.add_file(parse_source(SOURCE).unwrap());
        let package = inspect_declarations(declarations, package_dir.display().to_string());
        let generator = Generator::from_settings(&package, &qualified_settings()).unwrap();

        let inside = package_dir.join("module.go");
        let error = generator.write_to(&inside).unwrap_err();
        assert!(matches!(error, AnalyzerError::RenderFailure { .. }));
        assert!(!inside.exists());

        let outside_dir = root.path().join("examplefx");
        std::fs::create_dir(&outside_dir).unwrap();
        let outside = outside_dir.join("module.go");
        assert_eq!(generator.write_to(&outside).unwrap(), outside);
        assert!(std::fs::read_to_string(&outside).unwrap().starts_with(
            "// Code generated by autofx. DO NOT EDIT.\n\npackage examplefx\n"
        ));
    }

    #[test]
    fn test_empty_package_still_has_aggregate_module() {
        let package = Package::new("empty", "./empty");
        let source = Generator::new(&package).render().unwrap();

        assert!(source.ends_with("func Module() fx.Option {\n\treturn fx.Options()\n}\n"));
    }

    #[test]
    fn test_write_to_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let package = example();
        let target = dir.path().join("module.go");

        let written = Generator::new(&package).write_to(&target).unwrap();

        assert_eq!(written, target);
        assert!(std::fs::read_to_string(&target).unwrap().contains("func Module()"));
    }

    #[test]
    fn test_write_failure_is_render_failure() {
        let dir = tempfile::tempdir().unwrap();
        let package = example();

        let error = Generator::new(&package)
            .write_to(&dir.path().join("missing").join("module.go"))
            .unwrap_err();
        assert!(matches!(error, AnalyzerError::RenderFailure { .. }));
    }
}
