use std::{
    fmt::Display,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::Serialize;
use sigma_core::{
    analyze_path, cache_key, compare_analyses, inspect_path, round_report, scatter_path,
    to_json_string, Analysis, Comparison, ResultCache,
};

use crate::{
    config::{AnalyzerConfig, OutputFormat},
    error::CliResult,
    report::{AnalysisView, ComparisonView, ScatterView, SurveyView},
};

/// Сессия анализатора: конфигурация и кэш уже разобранных файлов.
pub struct Session {
    config: AnalyzerConfig,
    cache: ResultCache<PathBuf, Analysis>,
}

impl Session {
    pub fn new(config: AnalyzerConfig) -> Self {
        let cache = ResultCache::new(config.cache_capacity);
        Self { config, cache }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Анализ файла; повторный запрос того же пути берётся из кэша.
    pub fn analysis(
        &mut self,
        path: &Path,
    ) -> CliResult<Analysis> {
        let key = cache_key(path);

        if let Some(hit) = self.cache.get(&key) {
            debug!("Cache hit: {}", path.display());
            return Ok(hit.clone());
        }

        let analysis = analyze_path(path, &self.config.analysis_options())?;
        if let Some((evicted, _)) = self.cache.insert(key, analysis.clone()) {
            debug!("Cache evicted: {}", evicted.display());
        }

        Ok(analysis)
    }

    pub fn run_analyze(
        &mut self,
        paths: &[PathBuf],
    ) -> CliResult<String> {
        let mut analyses = Vec::with_capacity(paths.len());
        for path in paths {
            info!("Analyzing {}", path.display());
            let mut analysis = self.analysis(path)?;
            analysis.report = round_report(&analysis.report, self.config.decimals);
            analyses.push((path, analysis));
        }

        match self.config.output_format {
            OutputFormat::Text => Ok(analyses
                .iter()
                .map(|(path, analysis)| {
                    let label = path.display().to_string();
                    AnalysisView {
                        label: &label,
                        analysis,
                    }
                    .to_string()
                })
                .collect::<Vec<_>>()
                .join("\n")),
            _ => {
                let values: Vec<&Analysis> = analyses.iter().map(|(_, a)| a).collect();
                if let [single] = values.as_slice() {
                    self.json(single)
                } else {
                    self.json(&values)
                }
            }
        }
    }

    pub fn run_compare(
        &mut self,
        first: &Path,
        second: &Path,
    ) -> CliResult<String> {
        info!("Comparing {} with {}", first.display(), second.display());

        let mut cmp: Comparison = compare_analyses(self.analysis(first)?, self.analysis(second)?);
        cmp.first.report = round_report(&cmp.first.report, self.config.decimals);
        cmp.second.report = round_report(&cmp.second.report, self.config.decimals);

        let labels = (first.display().to_string(), second.display().to_string());
        self.render(
            &cmp,
            ComparisonView {
                labels: (labels.0.as_str(), labels.1.as_str()),
                comparison: &cmp,
            },
        )
    }

    pub fn run_inspect(
        &self,
        path: &Path,
    ) -> CliResult<String> {
        let survey = inspect_path(path, &self.config.analysis_options())?;
        self.render(&survey, SurveyView(&survey))
    }

    pub fn run_scatter(
        &self,
        path: &Path,
    ) -> CliResult<String> {
        let report = scatter_path(path, &self.config.analysis_options())?;
        self.render(&report, ScatterView(&report))
    }

    fn render<T: Serialize, V: Display>(
        &self,
        value: &T,
        view: V,
    ) -> CliResult<String> {
        match self.config.output_format {
            OutputFormat::Text => Ok(view.to_string()),
            _ => self.json(value),
        }
    }

    fn json<T: Serialize>(
        &self,
        value: &T,
    ) -> CliResult<String> {
        let pretty = self.config.output_format == OutputFormat::JsonPretty;
        Ok(to_json_string(value, pretty)?)
    }
}

/// Пишет результат в файл или в stdout.
pub fn emit(
    output: &str,
    path: Option<&Path>,
) -> CliResult<()> {
    match path {
        Some(path) => {
            let mut w = BufWriter::new(File::create(path)?);
            writeln!(w, "{output}")?;
            w.flush()?;
            info!("Report written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            writeln!(lock, "{output}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const LLH: &str = "2024/01/15 10:00:00.000 59.9 10.7 45.0 1 0.0100 0.0200 0.0300 12 0\n\
                       2024/01/15 10:00:01.000 59.9 10.7 45.0 1 0.0300 0.0400 0.0500 12 0\n";

    fn json_session() -> Session {
        Session::new(AnalyzerConfig {
            output_format: OutputFormat::Json,
            ..Default::default()
        })
    }

    #[test]
    fn test_analyze_single_file_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.llh");
        fs::write(&path, LLH).unwrap();

        let out = json_session().run_analyze(&[path]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(json["count"], 2);
        assert_eq!(json["summary"]["E"]["mean"], 20.0);
        assert_eq!(json["format"], "llh");
    }

    #[test]
    fn test_analyze_many_files_is_array() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.llh");
        let b = dir.path().join("b.xyz");
        fs::write(&a, LLH).unwrap();
        fs::write(&b, "# empty\n").unwrap();

        let out = json_session().run_analyze(&[a, b]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(json.as_array().map(|v| v.len()), Some(2));
        assert_eq!(json[1]["count"], 0);
    }

    #[test]
    fn test_session_caches_analysis() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.llh");
        fs::write(&path, LLH).unwrap();

        let mut session = json_session();
        let first = session.analysis(&path).unwrap();

        // Файл изменился, но результат берётся из кэша
        fs::write(&path, "").unwrap();
        let second = session.analysis(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_compare_text_output() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.llh");
        fs::write(&a, LLH).unwrap();

        let mut session = Session::new(AnalyzerConfig::default());
        let out = session.run_compare(&a, &a).unwrap();

        assert!(out.contains("Difference (second − first)"));
        assert!(out.contains("0.0"));
    }

    #[test]
    fn test_emit_to_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("report.json");

        emit("{}", Some(&out)).unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "{}\n");
    }
}
