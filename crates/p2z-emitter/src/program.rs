//! Whole-program conversion.
//!
//! Two phases: every class of every file is registered first, then each
//! class is converted against the completed registry. A failing class is
//! captured in its [`ClassOutput`] and does not stop the others; so is a
//! repeated declaration of a name the registry already holds, which would
//! otherwise overwrite the first one's output.

use p2z_ast::SourceFile;
use p2z_binder::{ClassContext, ClassRegistry};
use p2z_common::DiagnosticSink;
use p2z_types::{KnownClasses, TypeResolver};

use crate::error::ConvertError;
use crate::options::ConvertOptions;
use crate::printer::Printer;

/// Result of converting one class.
#[derive(Debug)]
pub struct ClassOutput {
    /// Fully qualified class name: `App\Models\User`.
    pub name: String,
    pub result: Result<String, ConvertError>,
}

impl ClassOutput {
    /// Output path relative to the output root: lower-cased namespace
    /// segments and class name, `app/models/user.zep`.
    pub fn relative_path(&self) -> String {
        let segments = self
            .name
            .split('\\')
            .filter(|segment| !segment.is_empty())
            .map(str::to_lowercase)
            .collect::<Vec<_>>();
        format!("{}.zep", segments.join("/"))
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Default)]
pub struct ProgramOutput {
    /// One entry per class, in input order.
    pub classes: Vec<ClassOutput>,
    pub diagnostics: DiagnosticSink,
}

impl ProgramOutput {
    pub fn failures(&self) -> impl Iterator<Item = &ClassOutput> {
        self.classes.iter().filter(|class| !class.is_ok())
    }
}

/// Convert every class declared in `files`.
#[tracing::instrument(level = "debug", skip_all, fields(files = files.len()))]
pub fn convert_program(files: &[SourceFile], options: &ConvertOptions) -> ProgramOutput {
    let registry = ClassRegistry::collect(files);
    let known_classes = KnownClasses::builtin().with_extra(&options.known_classes);
    let resolver = TypeResolver::new(&registry, &known_classes);

    let mut output = ProgramOutput::default();
    for file in files {
        for decl in &file.classes {
            let class = ClassContext::new(file, decl);
            let registered = registry
                .get(class.full_name())
                .is_some_and(|entry| std::ptr::eq(entry.decl, decl));
            let result = if registered {
                let (result, diagnostics) = convert_class(&class, &resolver, options);
                output.diagnostics.extend(diagnostics);
                result
            } else {
                Err(ConvertError::DuplicateClass {
                    class: class.full_name().to_string(),
                })
            };

            if let Err(err) = &result {
                tracing::warn!(class = %class.full_name(), %err, "class conversion failed");
            }
            output.classes.push(ClassOutput {
                name: class.full_name().to_string(),
                result,
            });
        }
    }
    tracing::debug!(
        classes = output.classes.len(),
        diagnostics = output.diagnostics.len(),
        "program converted"
    );
    output
}

/// Convert one class; diagnostics are returned even when conversion fails.
pub fn convert_class<'p>(
    class: &'p ClassContext<'p>,
    resolver: &'p TypeResolver<'p, 'p>,
    options: &ConvertOptions,
) -> (Result<String, ConvertError>, DiagnosticSink) {
    let mut printer = Printer::new(class, resolver, options.indent_width);
    let result = printer.print_class();
    (result, printer.into_diagnostics())
}
