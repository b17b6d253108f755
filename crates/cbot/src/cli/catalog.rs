use cbot_core::{AuxiliaryService, CoreModule, Database, REGISTRY};

use super::terminal::Colorize;

#[derive(Debug, Default, clap::Parser)]
pub struct Command {}

impl Command {
    pub fn run(self) {
        print!("{}", Self::listing());
    }

    fn listing() -> String {
        let mut out = String::new();

        out.push_str(&format!("{}\n", "Core modules".info()));
        for module in CoreModule::ALL {
            out.push_str(&entry(module.id(), module.name(), &module.image_name()));
        }

        out.push_str(&format!("\n{}\n", "Auxiliary services".info()));
        for service in AuxiliaryService::ALL {
            out.push_str(&entry(service.id(), service.name(), &service.image_name()));
        }

        out.push_str(&format!("\n{}\n", "Databases".info()));
        for database in Database::ALL {
            out.push_str(&entry(
                database.id(),
                database.name(),
                &format!("port {}", database.port()),
            ));
        }

        out.push_str(&format!(
            "\n{}\n",
            format!("Images are pulled from {REGISTRY}").dim()
        ));
        out
    }
}

fn entry(id: &str, name: &str, detail: &str) -> String {
    format!("  {id:<18} {name:<22} {}\n", detail.dim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_covers_catalog() {
        let listing = Command::listing();

        assert!(listing.contains("hf_model_hosting"));
        assert!(listing.contains("cbot-hf-model-hosting"));
        assert!(listing.contains("Microsoft SQL Server"));
        assert!(listing.contains("port 27017"));
        for module in CoreModule::ALL {
            assert!(listing.contains(module.id()));
        }
    }
}
