use std::ops::AddAssign;

use crate::{
    domain::{AuxiliaryService, CoreModule, FormSelections, Stage},
    report::{GpuRequirement, HardwareRow},
};

/// Operating systems supported on every stage.
pub const SUPPORTED_OS: &str = "CentOS 7/8 or RHEL";

/// Video memory required by hosted model serving, in GB.
pub const MODEL_HOSTING_VRAM_GB: u32 = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Resources {
    cpu: u32,
    ram: u32,
    disk: u32,
}

impl Resources {
    const fn new(cpu: u32, ram: u32, disk: u32) -> Self {
        Self { cpu, ram, disk }
    }
}

impl AddAssign for Resources {
    fn add_assign(&mut self, rhs: Self) {
        self.cpu += rhs.cpu;
        self.ram += rhs.ram;
        self.disk += rhs.disk;
    }
}

const fn baseline(stage: Stage) -> Resources {
    match stage {
        Stage::Test => Resources::new(4, 8, 40),
        Stage::Live => Resources::new(8, 16, 80),
    }
}

const fn module_delta(module: CoreModule, stage: Stage) -> Resources {
    match (module, stage) {
        (CoreModule::Classifier, Stage::Test) => Resources::new(4, 8, 0),
        (CoreModule::Classifier, Stage::Live) => Resources::new(8, 16, 0),
        (CoreModule::Aiflow, Stage::Test) => Resources::new(6, 8, 20),
        (CoreModule::Aiflow, Stage::Live) => Resources::new(10, 16, 40),
        (
            CoreModule::Panel
            | CoreModule::Fusion
            | CoreModule::Core
            | CoreModule::Livechat
            | CoreModule::Analytics,
            _,
        ) => Resources::new(0, 0, 0),
    }
}

const fn service_delta(service: AuxiliaryService, stage: Stage) -> Resources {
    match (service, stage) {
        (AuxiliaryService::Ocr, Stage::Test) => Resources::new(2, 4, 0),
        (AuxiliaryService::Ocr, Stage::Live) => Resources::new(4, 8, 0),
        (AuxiliaryService::HfModelHosting, Stage::Test) => Resources::new(0, 16, 0),
        (AuxiliaryService::HfModelHosting, Stage::Live) => Resources::new(0, 32, 0),
        (
            AuxiliaryService::Masking | AuxiliaryService::FileToMd | AuxiliaryService::Crawler,
            _,
        ) => Resources::new(0, 0, 0),
    }
}

const fn service_gpu(service: AuxiliaryService) -> GpuRequirement {
    match service {
        AuxiliaryService::HfModelHosting => GpuRequirement::MinimumVram(MODEL_HOSTING_VRAM_GB),
        AuxiliaryService::Ocr
        | AuxiliaryService::Masking
        | AuxiliaryService::FileToMd
        | AuxiliaryService::Crawler => GpuRequirement::NotRequired,
    }
}

/// The GPU requirement implied by the selected services.
pub(crate) fn gpu_requirement(selections: &FormSelections) -> GpuRequirement {
    selections
        .auxiliary_services()
        .iter()
        .map(|service| service_gpu(*service))
        .fold(GpuRequirement::NotRequired, |acc, gpu| match (acc, gpu) {
            (GpuRequirement::MinimumVram(a), GpuRequirement::MinimumVram(b)) => {
                GpuRequirement::MinimumVram(a.max(b))
            }
            (GpuRequirement::MinimumVram(gb), GpuRequirement::NotRequired)
            | (GpuRequirement::NotRequired, GpuRequirement::MinimumVram(gb)) => {
                GpuRequirement::MinimumVram(gb)
            }
            (GpuRequirement::NotRequired, GpuRequirement::NotRequired) => {
                GpuRequirement::NotRequired
            }
        })
}

/// Sizes one row per stage of the selected environment, test first.
pub(crate) fn size(selections: &FormSelections) -> Vec<HardwareRow> {
    let gpu = gpu_requirement(selections);

    selections
        .environment()
        .stages()
        .iter()
        .map(|&stage| {
            let mut total = baseline(stage);
            for module in selections.core_modules() {
                total += module_delta(*module, stage);
            }
            for service in selections.auxiliary_services() {
                total += service_delta(*service, stage);
            }
            HardwareRow {
                stage,
                cpu_cores: total.cpu,
                ram_gb: total.ram,
                disk_gb: total.disk,
                gpu,
                os: SUPPORTED_OS,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::domain::{Database, Environment, EnvironmentType};

    fn selections(environment: Environment) -> FormSelections {
        FormSelections::new(environment, EnvironmentType::OnPrem, Database::Mssql)
    }

    fn figures(row: &HardwareRow) -> (u32, u32, u32) {
        (row.cpu_cores, row.ram_gb, row.disk_gb)
    }

    #[test_case(Environment::Test, &[Stage::Test]; "test only")]
    #[test_case(Environment::Live, &[Stage::Live]; "live only")]
    #[test_case(Environment::Both, &[Stage::Test, Stage::Live]; "both")]
    fn one_row_per_selected_stage(environment: Environment, expected: &[Stage]) {
        let stages: Vec<_> = size(&selections(environment))
            .iter()
            .map(|row| row.stage)
            .collect();
        assert_eq!(stages, expected);
    }

    #[test]
    fn baseline_without_adjustments() {
        let rows = size(&selections(Environment::Both).with_module(CoreModule::Panel));
        assert_eq!(figures(&rows[0]), (4, 8, 40));
        assert_eq!(figures(&rows[1]), (8, 16, 80));
        assert_eq!(rows[0].os, SUPPORTED_OS);
    }

    #[test_case(CoreModule::Classifier, (8, 16, 40), (16, 32, 80); "classifier")]
    #[test_case(CoreModule::Aiflow, (10, 16, 60), (18, 32, 120); "aiflow")]
    #[test_case(CoreModule::Fusion, (4, 8, 40), (8, 16, 80); "fusion adds nothing")]
    fn module_adjustments(
        module: CoreModule,
        test: (u32, u32, u32),
        live: (u32, u32, u32),
    ) {
        let rows = size(&selections(Environment::Both).with_module(module));
        assert_eq!(figures(&rows[0]), test);
        assert_eq!(figures(&rows[1]), live);
    }

    #[test_case(AuxiliaryService::Ocr, (6, 12, 40), (12, 24, 80); "ocr")]
    #[test_case(AuxiliaryService::HfModelHosting, (4, 24, 40), (8, 48, 80); "hf model hosting")]
    #[test_case(AuxiliaryService::Crawler, (4, 8, 40), (8, 16, 80); "crawler adds nothing")]
    fn service_adjustments(
        service: AuxiliaryService,
        test: (u32, u32, u32),
        live: (u32, u32, u32),
    ) {
        let rows = size(&selections(Environment::Both).with_service(service));
        assert_eq!(figures(&rows[0]), test);
        assert_eq!(figures(&rows[1]), live);
    }

    #[test]
    fn adjustments_accumulate() {
        let rows = size(
            &selections(Environment::Live)
                .with_module(CoreModule::Classifier)
                .with_module(CoreModule::Aiflow)
                .with_service(AuxiliaryService::Ocr)
                .with_service(AuxiliaryService::HfModelHosting),
        );
        assert_eq!(figures(&rows[0]), (8 + 8 + 10 + 4, 16 + 16 + 16 + 8 + 32, 80 + 40));
    }

    #[test]
    fn gpu_only_for_model_hosting() {
        let plain = selections(Environment::Both)
            .with_module(CoreModule::Aiflow)
            .with_service(AuxiliaryService::Ocr);
        assert!(size(&plain)
            .iter()
            .all(|row| row.gpu.to_string() == "not required"));

        let hosting = plain.with_service(AuxiliaryService::HfModelHosting);
        assert!(size(&hosting)
            .iter()
            .all(|row| row.gpu.to_string() == "minimum 16GB VRAM"));
    }
}
