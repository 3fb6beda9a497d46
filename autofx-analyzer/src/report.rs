//! Human-readable package listing with optional ANSI color
//!
//! Signatures are printed the way gofmt writes them, so parameter and
//! result lists are separated by `, ` rather than a bare comma.

use crate::model::Package;
use std::fmt;

struct Colors {
    use_color: bool,
}

impl Colors {
    fn heading(&self) -> &'static str {
        if self.use_color { "\x1b[1;33m" } else { "" }
    }

    fn name(&self) -> &'static str {
        if self.use_color { "\x1b[32m" } else { "" }
    }

    fn detail(&self) -> &'static str {
        if self.use_color { "\x1b[36m" } else { "" }
    }

    fn muted(&self) -> &'static str {
        if self.use_color { "\x1b[90m" } else { "" }
    }

    fn reset(&self) -> &'static str {
        if self.use_color { "\x1b[0m" } else { "" }
    }
}

/// Interfaces with their methods and implementers, concrete types with
/// their constructor and methods, then free functions
pub struct Report<'a> {
    package: &'a Package,
    colors: Colors,
}

impl<'a> Report<'a> {
    pub fn new(package: &'a Package) -> Self {
        Self {
            package,
            colors: Colors { use_color: false },
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.colors.use_color = use_color;
        self
    }

    fn section(&self, f: &mut fmt::Formatter<'_>, title: &str, count: usize) -> fmt::Result {
        let c = &self.colors;
        writeln!(f, "\n{}{title} ({count}){}", c.heading(), c.reset())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.colors;
        let package = self.package;

        writeln!(f, "package {}{}{}", c.name(), package.name, c.reset())?;
        writeln!(f, "{}{}{}", c.muted(), package.path, c.reset())?;

        self.section(f, "Interfaces", package.interface_count())?;
        for interface in package.interfaces() {
            writeln!(f, "  {}{}{}", c.name(), interface.name, c.reset())?;
            for method in &interface.methods {
                writeln!(f, "    {}{}{}", c.detail(), method.render(), c.reset())?;
            }
            if interface.implementations().is_empty() {
                writeln!(f, "    {}implemented by: none{}", c.muted(), c.reset())?;
            } else {
                writeln!(
                    f,
                    "    {}implemented by: {}{}",
                    c.muted(),
                    interface.implementations().join(", "),
                    c.reset()
                )?;
            }
        }

        self.section(f, "Structs", package.concrete_type_count())?;
        for concrete in package.concrete_types() {
            writeln!(f, "  {}{}{}", c.name(), concrete.name, c.reset())?;
            match concrete.constructor() {
                Some(constructor) => writeln!(
                    f,
                    "    {}constructor: {}{}",
                    c.muted(),
                    constructor.render(),
                    c.reset()
                )?,
                None => writeln!(f, "    {}constructor: none{}", c.muted(), c.reset())?,
            }
            for method in package.methods_of(concrete) {
                writeln!(f, "    {}{}{}", c.detail(), method.render(package), c.reset())?;
            }
        }

        self.section(f, "Functions", package.function_count())?;
        for function in package.functions() {
            writeln!(f, "  {}{}{}", c.detail(), function.render(), c.reset())?;
        }

        Ok(())
    }
}
