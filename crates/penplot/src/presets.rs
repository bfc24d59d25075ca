use crate::machine::MachineProfile;
use crate::style::StyleProfile;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Named style and machine profiles persisted on disk.
///
/// Built-in names (`default`/`compact` styles, `plotter`/`preview` machines)
/// resolve even when the file does not define them; entries in the file
/// override them.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PresetLibrary {
    #[serde(default)]
    pub styles: BTreeMap<String, StyleProfile>,
    #[serde(default)]
    pub machines: BTreeMap<String, MachineProfile>,
}

impl PresetLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a library from the provided path. Missing files yield an empty library.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::new());
        }

        let data =
            fs::read(path).with_context(|| format!("read preset library {}", path.display()))?;
        let library: PresetLibrary = serde_json::from_slice(&data)
            .with_context(|| format!("parse preset library {}", path.display()))?;
        library
            .validate()
            .with_context(|| format!("invalid preset in {}", path.display()))?;
        Ok(library)
    }

    /// Check every stored preset, naming the first one that is unusable.
    pub fn validate(&self) -> Result<()> {
        for (name, style) in &self.styles {
            style
                .validate()
                .with_context(|| format!("style preset {name:?}"))?;
        }
        for (name, machine) in &self.machines {
            machine
                .validate()
                .with_context(|| format!("machine profile {name:?}"))?;
        }
        Ok(())
    }

    /// Persist the library to the provided path, ensuring the directory exists.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create preset directory {}", parent.display()))?;
        }

        let data =
            serde_json::to_vec_pretty(self).context("serialize preset library to JSON bytes")?;
        fs::write(path, data).with_context(|| format!("write preset library {}", path.display()))
    }

    pub fn add_style(&mut self, name: impl Into<String>, style: StyleProfile) {
        self.styles.insert(name.into(), style);
    }

    /// Validate `style` and store it under `name`, replacing any previous entry.
    pub fn store_style(&mut self, name: &str, style: StyleProfile) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow!("style preset name is empty"));
        }
        style
            .validate()
            .with_context(|| format!("style preset {name:?}"))?;
        self.add_style(name, style);
        Ok(())
    }

    pub fn add_machine(&mut self, machine: MachineProfile) {
        self.machines.insert(machine.name.clone(), machine);
    }

    pub fn style(&self, name: &str) -> Result<StyleProfile> {
        if let Some(style) = self.styles.get(name) {
            return Ok(style.clone());
        }
        match name {
            "default" => Ok(StyleProfile::default()),
            "compact" => Ok(StyleProfile::compact()),
            _ => Err(anyhow!("unknown style preset {name:?}")),
        }
    }

    pub fn machine(&self, name: &str) -> Result<MachineProfile> {
        self.machines
            .get(name)
            .cloned()
            .or_else(|| MachineProfile::builtin(name))
            .ok_or_else(|| anyhow!("unknown machine profile {name:?}"))
    }

    /// All resolvable style names, built-ins included.
    pub fn style_names(&self) -> Vec<String> {
        let mut names: Vec<String> = ["default", "compact"].map(String::from).to_vec();
        names.extend(self.styles.keys().cloned());
        names.sort();
        names.dedup();
        names
    }

    /// All resolvable machine names, built-ins included.
    pub fn machine_names(&self) -> Vec<String> {
        let mut names: Vec<String> = ["plotter", "preview"].map(String::from).to_vec();
        names.extend(self.machines.keys().cloned());
        names.sort();
        names.dedup();
        names
    }

    /// Resolve the default library path (`~/.penplot/presets.json`).
    pub fn default_library_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("could not determine home directory"))?;
        Ok(home.join(".penplot").join("presets.json"))
    }
}
