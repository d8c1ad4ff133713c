//! Minimal CLI: model files → example JSON body
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use crate::envelope::ContainerShape;
use crate::facet::FacetSet;
use crate::log::RecordingLogger;
use crate::model::TypeModel;
use crate::synth::{EnumSelection, ExampleGenerator};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate sample JSON documents for the object types of a documented type model
#[derive(Parser, Debug)]
#[command(name = "json-example", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print an example document for one object type
    Render(RenderOut),
    /// list the object types defined by the model
    Types(TypesOut),
}

#[derive(Args, Debug, Clone)]
struct ModelSettings {
    /// One or more model files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    model: Vec<String>,

    /// wrap root instances under their JSON root name (overrides the model files)
    #[arg(long, default_value_t = false)]
    wrap_root: bool,
}

#[derive(clap::Parser, Debug)]
struct RenderOut {
    #[command(flatten)]
    model_settings: ModelSettings,

    /// qualified name of the object type to render
    #[arg(long)]
    root: String,

    /// container shapes around the instance, innermost first (array, collection, list, map)
    #[arg(long = "container", value_name = "SHAPE")]
    containers: Vec<ContainerShape>,

    /// only show members in these facets (members without facets always show)
    #[arg(long = "include-facet", value_name = "FACET")]
    include_facets: Vec<String>,

    /// hide members in these facets
    #[arg(long = "exclude-facet", value_name = "FACET")]
    exclude_facets: Vec<String>,

    /// pick enum values with a seeded generator instead of the first value
    #[arg(long, conflicts_with = "enum_random")]
    enum_seed: Option<u64>,

    /// pick enum values at random
    #[arg(long, default_value_t = false)]
    enum_random: bool,

    /// fail if any example warning was emitted
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct TypesOut {
    #[command(flatten)]
    model_settings: ModelSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl ModelSettings {
    fn load(&self) -> Result<TypeModel> {
        let mut model = crate::model_file::load_models(&self.model)
            .with_context(|| format!("failed to load model from {}", self.model.join(", ")))?;
        model.wrap_root_value |= self.wrap_root;
        tracing::debug!(types = model.len(), "model loaded");
        Ok(model)
    }
}

impl RenderOut {
    fn enum_selection(&self) -> EnumSelection {
        match (self.enum_seed, self.enum_random) {
            (Some(seed), _) => EnumSelection::Seeded(seed),
            (None, true) => EnumSelection::Random,
            (None, false) => EnumSelection::First,
        }
    }

    fn run(&self) -> Result<()> {
        let model = self.model_settings.load()?;
        let facets = FacetSet::new(
            self.include_facets.iter().cloned(),
            self.exclude_facets.iter().cloned(),
        );
        let log = RecordingLogger::new();

        let generator = ExampleGenerator::new(&model)
            .with_filter(&facets)
            .with_logger(&log)
            .with_enum_selection(self.enum_selection());
        let body = generator
            .render(&self.root, &self.containers)
            .with_context(|| format!("failed to generate an example for `{}`", self.root))?;

        if self.strict && log.count() > 0 {
            bail!("{} warning(s) while generating the example for `{}`", log.count(), self.root);
        }

        write_output(self.out.as_ref(), &body)
    }
}

impl TypesOut {
    fn run(&self) -> Result<()> {
        let model = self.model_settings.load()?;
        let listing = model
            .objects()
            .map(|def| def.name.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        println!("{listing}");
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Render(target) => target.run(),
            Command::Types(target) => target.run(),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&PathBuf>, body: &str) -> Result<()> {
    let Some(out) = out else {
        println!("{body}");
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, body).with_context(|| format!("failed to write {}", out.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        CommandLineInterface::command().debug_assert();
    }

    #[test]
    fn render_arguments_parse() {
        let cli = CommandLineInterface::try_parse_from([
            "json-example", "render", "-m", "a.json", "b/*.json",
            "--root", "com.acme.Person",
            "--container", "list", "--container", "map",
            "--exclude-facet", "internal",
            "--enum-seed", "3",
        ])
        .unwrap();
        let Command::Render(render) = cli.cmd else {
            panic!("expected render")
        };
        assert_eq!(render.model_settings.model, ["a.json", "b/*.json"]);
        assert_eq!(render.containers, [ContainerShape::List, ContainerShape::Map]);
        assert_eq!(render.exclude_facets, ["internal"]);
        assert_eq!(render.enum_selection(), EnumSelection::Seeded(3));
    }

    #[test]
    fn unknown_container_is_rejected() {
        let parsed = CommandLineInterface::try_parse_from([
            "json-example", "render", "-m", "a.json", "--root", "A", "--container", "set",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn seed_and_random_conflict() {
        let parsed = CommandLineInterface::try_parse_from([
            "json-example",
            "render",
            "-m",
            "a.json",
            "--root",
            "A",
            "--enum-seed",
            "1",
            "--enum-random",
        ]);
        assert!(parsed.is_err());
    }
}
