// SIS Kernel Security Testing Framework
// Comprehensive security testing, fuzzing, and vulnerability analysis

use crate::{TestSuiteConfig, TestError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod fuzzing;
pub mod vulnerability_scanner;
pub mod crypto_validation;
pub mod memory_safety;

pub use fuzzing::*;
pub use vulnerability_scanner::*;
pub use crypto_validation::*;
pub use memory_safety::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityTestResults {
    pub fuzzing_results: FuzzingResults,
    pub vulnerability_scan_results: VulnerabilityResults,
    pub crypto_validation_results: CryptoValidationResults,
    pub memory_safety_results: MemorySafetyResults,
    pub security_score: f64,
    pub critical_vulnerabilities: u32,
    pub high_vulnerabilities: u32,
    pub medium_vulnerabilities: u32,
    pub low_vulnerabilities: u32,
    pub total_vulnerabilities: u32,
    pub static_analysis_issues: u32,
    pub fuzzing_iterations: u64,
    pub penetration_test_scenarios: u32,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzingResults {
    pub total_test_cases: u64,
    pub crashes_found: u32,
    pub hangs_found: u32,
    pub memory_errors_found: u32,
    pub assertion_failures: u32,
    pub code_coverage_percentage: f64,
    pub unique_bugs_found: u32,
    pub max_execution_time_ms: f64,
    pub fuzzing_duration_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VulnerabilityResults {
    pub buffer_overflow_checks: VulnerabilityCheckResult,
    pub integer_overflow_checks: VulnerabilityCheckResult,
    pub use_after_free_checks: VulnerabilityCheckResult,
    pub double_free_checks: VulnerabilityCheckResult,
    pub race_condition_checks: VulnerabilityCheckResult,
    pub privilege_escalation_checks: VulnerabilityCheckResult,
    pub timing_attack_resistance: VulnerabilityCheckResult,
    pub side_channel_resistance: VulnerabilityCheckResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VulnerabilityCheckResult {
    pub passed: bool,
    pub severity: VulnerabilitySeverity,
    pub description: String,
    pub mitigation_suggestions: Vec<String>,
    pub cwe_ids: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VulnerabilitySeverity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoValidationResults {
    pub rng_quality_tests: RandomnessTestResults,
    pub encryption_strength_tests: EncryptionTestResults,
    pub key_management_tests: KeyManagementTestResults,
    pub hash_function_tests: HashFunctionTestResults,
    pub side_channel_resistance_tests: SideChannelTestResults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomnessTestResults {
    pub entropy_score: f64,
    pub statistical_tests_passed: u32,
    pub statistical_tests_total: u32,
    pub nist_suite_results: HashMap<String, bool>,
    pub diehard_tests_passed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptionTestResults {
    pub algorithm_compliance: HashMap<String, bool>,
    pub key_size_validation: bool,
    pub mode_of_operation_security: bool,
    pub padding_scheme_security: bool,
    pub iv_generation_quality: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyManagementTestResults {
    pub key_generation_entropy: f64,
    pub key_derivation_security: bool,
    pub key_rotation_compliance: bool,
    pub key_storage_security: bool,
    pub key_destruction_verification: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashFunctionTestResults {
    pub collision_resistance_tests: bool,
    pub preimage_resistance_tests: bool,
    pub second_preimage_resistance_tests: bool,
    pub avalanche_effect_score: f64,
    pub performance_benchmarks: HashMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideChannelTestResults {
    pub timing_attack_resistance: f64,
    pub power_analysis_resistance: f64,
    pub cache_timing_resistance: f64,
    pub electromagnetic_resistance: f64,
    pub acoustic_resistance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorySafetyResults {
    pub stack_overflow_protection: bool,
    pub heap_overflow_protection: bool,
    pub use_after_free_detection: bool,
    pub double_free_detection: bool,
    pub memory_leak_detection: MemoryLeakResults,
    pub control_flow_integrity: bool,
    pub stack_canary_protection: bool,
    pub aslr_effectiveness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryLeakResults {
    pub total_allocations: u64,
    pub total_deallocations: u64,
    pub leaked_bytes: u64,
    pub leak_locations: Vec<LeakLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeakLocation {
    pub function: String,
    pub file: String,
    pub line: u32,
    pub bytes_leaked: u64,
}

pub struct SecurityTestSuite {
    config: TestSuiteConfig,
    fuzzer: FuzzingEngine,
    vulnerability_scanner: VulnerabilityScanner,
    crypto_validator: CryptoValidator,
    memory_safety_checker: MemorySafetyChecker,
}

impl SecurityTestSuite {
    pub fn new(config: &TestSuiteConfig) -> Self {
        Self {
            config: config.clone(),
            fuzzer: FuzzingEngine::new(config),
            vulnerability_scanner: VulnerabilityScanner::new(config),
            crypto_validator: CryptoValidator::new(config),
            memory_safety_checker: MemorySafetyChecker::new(config),
        }
    }

    pub async fn run_comprehensive_security_tests(&self) -> Result<SecurityTestResults, TestError> {
        log::info!("Starting comprehensive security testing");
        log::info!("Testing kernel security with {} test configurations", self.config.performance_iterations);

        // Run fuzzing tests
        let fuzzing_results = self.run_fuzzing_campaign().await?;
        
        // Run vulnerability scanning
        let vulnerability_results = self.run_vulnerability_scans().await?;
        
        // Run cryptographic validation
        let crypto_results = self.run_crypto_validation().await?;
        
        // Run memory safety analysis
        let memory_safety_results = self.run_memory_safety_analysis().await?;
        
        // Calculate overall security score
        let security_score = self.calculate_security_score(
            &fuzzing_results,
            &vulnerability_results,
            &crypto_results,
            &memory_safety_results
        );

        // Count vulnerabilities by severity
        let (critical, high, medium, low) = self.count_vulnerabilities(&vulnerability_results);
        
        // Extract values before moving
        let fuzzing_iterations = fuzzing_results.total_test_cases;

        Ok(SecurityTestResults {
            fuzzing_results,
            vulnerability_scan_results: vulnerability_results,
            crypto_validation_results: crypto_results,
            memory_safety_results,
            security_score,
            critical_vulnerabilities: critical,
            high_vulnerabilities: high,
            medium_vulnerabilities: medium,
            low_vulnerabilities: low,
            total_vulnerabilities: critical + high + medium + low,
            static_analysis_issues: 25, // Example value
            fuzzing_iterations,
            penetration_test_scenarios: 15, // Example value
            timestamp: chrono::Utc::now(),
        })
    }

    async fn run_fuzzing_campaign(&self) -> Result<FuzzingResults, TestError> {
        log::info!("Running comprehensive fuzzing campaign");
        
        let start_time = std::time::Instant::now();
        
        // Fuzz system call interfaces
        let syscall_results = self.fuzzer.fuzz_syscalls().await?;
        
        // Fuzz memory management
        let memory_results = self.fuzzer.fuzz_memory_management().await?;
        
        // Fuzz I/O operations
        let io_results = self.fuzzer.fuzz_io_operations().await?;
        
        // Fuzz network protocols
        let network_results = self.fuzzer.fuzz_network_protocols().await?;
        
        let duration = start_time.elapsed();

        Ok(FuzzingResults {
            total_test_cases: syscall_results.test_cases + memory_results.test_cases + 
                            io_results.test_cases + network_results.test_cases,
            crashes_found: syscall_results.crashes + memory_results.crashes + 
                          io_results.crashes + network_results.crashes,
            hangs_found: syscall_results.hangs + memory_results.hangs + 
                        io_results.hangs + network_results.hangs,
            memory_errors_found: memory_results.memory_errors,
            assertion_failures: syscall_results.assertions + memory_results.assertions + 
                              io_results.assertions + network_results.assertions,
            code_coverage_percentage: self.calculate_coverage_percentage(&[
                syscall_results.coverage, memory_results.coverage, 
                io_results.coverage, network_results.coverage
            ]),
            unique_bugs_found: self.deduplicate_bugs(&[
                syscall_results.bugs, memory_results.bugs, 
                io_results.bugs, network_results.bugs
            ]).len() as u32,
            max_execution_time_ms: [
                syscall_results.max_exec_time, memory_results.max_exec_time,
                io_results.max_exec_time, network_results.max_exec_time
            ].iter().cloned().fold(0.0, f64::max),
            fuzzing_duration_hours: duration.as_secs_f64() / 3600.0,
        })
    }

    async fn run_vulnerability_scans(&self) -> Result<VulnerabilityResults, TestError> {
        log::info!("Running vulnerability scans");
        
        Ok(VulnerabilityResults {
            buffer_overflow_checks: self.vulnerability_scanner.check_buffer_overflows().await?,
            integer_overflow_checks: self.vulnerability_scanner.check_integer_overflows().await?,
            use_after_free_checks: self.vulnerability_scanner.check_use_after_free().await?,
            double_free_checks: self.vulnerability_scanner.check_double_free().await?,
            race_condition_checks: self.vulnerability_scanner.check_race_conditions().await?,
            privilege_escalation_checks: self.vulnerability_scanner.check_privilege_escalation().await?,
            timing_attack_resistance: self.vulnerability_scanner.check_timing_attacks().await?,
            side_channel_resistance: self.vulnerability_scanner.check_side_channels().await?,
        })
    }

    async fn run_crypto_validation(&self) -> Result<CryptoValidationResults, TestError> {
        log::info!("Running cryptographic validation tests");
        
        Ok(CryptoValidationResults {
            rng_quality_tests: self.crypto_validator.test_randomness_quality().await?,
            encryption_strength_tests: self.crypto_validator.test_encryption_strength().await?,
            key_management_tests: self.crypto_validator.test_key_management().await?,
            hash_function_tests: self.crypto_validator.test_hash_functions().await?,
            side_channel_resistance_tests: self.crypto_validator.test_side_channel_resistance().await?,
        })
    }

    async fn run_memory_safety_analysis(&self) -> Result<MemorySafetyResults, TestError> {
        log::info!("Running memory safety analysis");
        
        Ok(MemorySafetyResults {
            stack_overflow_protection: self.memory_safety_checker.check_stack_protection().await?,
            heap_overflow_protection: self.memory_safety_checker.check_heap_protection().await?,
            use_after_free_detection: self.memory_safety_checker.check_use_after_free_detection().await?,
            double_free_detection: self.memory_safety_checker.check_double_free_detection().await?,
            memory_leak_detection: self.memory_safety_checker.detect_memory_leaks().await?,
            control_flow_integrity: self.memory_safety_checker.check_control_flow_integrity().await?,
            stack_canary_protection: self.memory_safety_checker.check_stack_canaries().await?,
            aslr_effectiveness: self.memory_safety_checker.measure_aslr_effectiveness().await?,
        })
    }

    fn calculate_security_score(
        &self,
        fuzzing: &FuzzingResults,
        vulnerabilities: &VulnerabilityResults,
        crypto: &CryptoValidationResults,
        memory: &MemorySafetyResults,
    ) -> f64 {
        let mut score = 100.0;

        // Deduct points for fuzzing issues
        score -= fuzzing.crashes_found as f64 * 5.0;
        score -= fuzzing.hangs_found as f64 * 3.0;
        score -= fuzzing.memory_errors_found as f64 * 4.0;

        // Deduct points for vulnerabilities
        if !vulnerabilities.buffer_overflow_checks.passed {
            score -= match vulnerabilities.buffer_overflow_checks.severity {
                VulnerabilitySeverity::Critical => 20.0,
                VulnerabilitySeverity::High => 15.0,
                VulnerabilitySeverity::Medium => 10.0,
                VulnerabilitySeverity::Low => 5.0,
                VulnerabilitySeverity::Info => 1.0,
            };
        }

        // Add points for good crypto practices
        let crypto_score = (crypto.rng_quality_tests.entropy_score +
                           crypto.hash_function_tests.avalanche_effect_score +
                           crypto.side_channel_resistance_tests.timing_attack_resistance) / 3.0;
        score += crypto_score * 0.1;

        // Deduct points for memory safety issues
        if !memory.stack_overflow_protection { score -= 10.0; }
        if !memory.heap_overflow_protection { score -= 10.0; }
        if !memory.use_after_free_detection { score -= 8.0; }
        if !memory.double_free_detection { score -= 8.0; }
        if memory.memory_leak_detection.leaked_bytes > 1024 * 1024 { score -= 5.0; }

        score.max(0.0).min(100.0)
    }

    fn count_vulnerabilities(&self, results: &VulnerabilityResults) -> (u32, u32, u32, u32) {
        let vulnerabilities = vec![
            &results.buffer_overflow_checks,
            &results.integer_overflow_checks,
            &results.use_after_free_checks,
            &results.double_free_checks,
            &results.race_condition_checks,
            &results.privilege_escalation_checks,
            &results.timing_attack_resistance,
            &results.side_channel_resistance,
        ];

        let mut critical = 0;
        let mut high = 0;
        let mut medium = 0;
        let mut low = 0;

        for vuln in vulnerabilities {
            if !vuln.passed {
                match vuln.severity {
                    VulnerabilitySeverity::Critical => critical += 1,
                    VulnerabilitySeverity::High => high += 1,
                    VulnerabilitySeverity::Medium => medium += 1,
                    VulnerabilitySeverity::Low => low += 1,
                    VulnerabilitySeverity::Info => {},
                }
            }
        }

        (critical, high, medium, low)
    }

    fn calculate_coverage_percentage(&self, coverages: &[f64]) -> f64 {
        if coverages.is_empty() {
            return 0.0;
        }
        coverages.iter().sum::<f64>() / coverages.len() as f64
    }

    fn deduplicate_bugs(&self, bug_lists: &[Vec<String>]) -> Vec<String> {
        let mut unique_bugs = std::collections::HashSet::new();
        for bugs in bug_lists {
            for bug in bugs {
                unique_bugs.insert(bug.clone());
            }
        }
        unique_bugs.into_iter().collect()
    }
}

pub fn generate_security_test_report(results: &SecurityTestResults) -> String {
    let mut report = String::new();
    
    report.push_str("# Security Testing Report\n\n");
    
    report.push_str("## Executive Summary\n");
    report.push_str(&format!("Overall Security Score: {:.1}/100\n", results.security_score));
    report.push_str(&format!("Critical Vulnerabilities: {}\n", results.critical_vulnerabilities));
    report.push_str(&format!("High Vulnerabilities: {}\n", results.high_vulnerabilities));
    report.push_str(&format!("Medium Vulnerabilities: {}\n", results.medium_vulnerabilities));
    report.push_str(&format!("Low Vulnerabilities: {}\n\n", results.low_vulnerabilities));
    
    report.push_str("## Fuzzing Results\n");
    report.push_str(&format!("- Total Test Cases: {}\n", results.fuzzing_results.total_test_cases));
    report.push_str(&format!("- Crashes Found: {}\n", results.fuzzing_results.crashes_found));
    report.push_str(&format!("- Memory Errors: {}\n", results.fuzzing_results.memory_errors_found));
    report.push_str(&format!("- Code Coverage: {:.1}%\n", results.fuzzing_results.code_coverage_percentage));
    report.push_str(&format!("- Unique Bugs: {}\n\n", results.fuzzing_results.unique_bugs_found));
    
    report.push_str("## Cryptographic Validation\n");
    report.push_str(&format!("- RNG Entropy Score: {:.2}\n", results.crypto_validation_results.rng_quality_tests.entropy_score));
    report.push_str(&format!("- Hash Avalanche Effect: {:.2}\n", results.crypto_validation_results.hash_function_tests.avalanche_effect_score));
    report.push_str(&format!("- Timing Attack Resistance: {:.2}\n", results.crypto_validation_results.side_channel_resistance_tests.timing_attack_resistance));
    
    report.push_str("## Memory Safety Analysis\n");
    report.push_str(&format!("- Stack Protection: {}\n", results.memory_safety_results.stack_overflow_protection));
    report.push_str(&format!("- Heap Protection: {}\n", results.memory_safety_results.heap_overflow_protection));
    report.push_str(&format!("- Memory Leaks: {} bytes\n", results.memory_safety_results.memory_leak_detection.leaked_bytes));
    report.push_str(&format!("- ASLR Effectiveness: {:.1}%\n", results.memory_safety_results.aslr_effectiveness * 100.0));
    
    report
}