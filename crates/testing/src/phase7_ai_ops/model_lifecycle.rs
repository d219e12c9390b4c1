//! Model Lifecycle Tests
//!
//! Validates model registry operations, hot-swap capabilities, and rollback mechanisms.

use crate::kernel_interface::KernelCommandInterface;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::Duration;

/// Model metadata for testing
#[derive(Debug, Clone)]
pub struct ModelMetadata {
    pub id: String,
    pub size_kb: u32,
    pub context_size: u32,
}

/// Test results for model lifecycle operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelLifecycleTestResults {
    pub passed: bool,
    pub registration_passed: bool,
    pub hot_swap_passed: bool,
    pub rollback_passed: bool,
    pub multi_model_passed: bool,
    pub total_tests: u32,
    pub passed_tests: u32,
}

/// Model lifecycle test suite
pub struct ModelLifecycleTests {
    kernel_interface: KernelCommandInterface,
}

impl ModelLifecycleTests {
    /// Create a new model lifecycle test suite
    pub fn new(kernel_interface: KernelCommandInterface) -> Self {
        Self { kernel_interface }
    }

    /// Test 1.1: Model Registration
    ///
    /// **Objective:** Validate model registration with metadata.
    ///
    /// **Steps:**
    /// 1. Register a test model with specified size and context
    /// 2. List registered models
    /// 3. Verify model appears in registry
    ///
    /// **Expected Output:**
    /// ```text
    /// Model registered: test-model-v1 (512KB, ctx=2048)
    /// Registry: [test-model-v1]
    /// ```
    ///
    /// **Metrics:**
    /// - Registration time < 100ms
    /// - Registry lookup time < 10ms
    async fn test_model_registration(&mut self) -> Result<bool, Box<dyn Error>> {
        log::info!("  Testing model registration...");

        // Register a test model
        let start = std::time::Instant::now();
        let output = self.kernel_interface
            .execute_command("llmctl register --id test-model-v1 --size 512 --ctx 2048")
            .await?;
        let registration_time = start.elapsed();

        // Validate output
        let registration_ok = output.raw_output.contains("Model registered") ||
                             output.raw_output.contains("test-model-v1") ||
                             output.raw_output.contains("registered");

        // Check registration time
        let timing_ok = registration_time < Duration::from_millis(100);

        if !timing_ok {
            log::warn!("    ⚠️  Registration took {}ms (target: <100ms)",
                registration_time.as_millis());
        }

        // List models to verify
        let list_start = std::time::Instant::now();
        let list_output = self.kernel_interface
            .execute_command("llmctl list")
            .await?;
        let list_time = list_start.elapsed();

        let list_ok = list_output.raw_output.contains("test-model-v1") ||
                     list_output.raw_output.contains("Registry") ||
                     list_output.raw_output.contains("model");

        let list_timing_ok = list_time < Duration::from_millis(10);

        if !list_timing_ok {
            log::warn!("    ⚠️  Registry lookup took {}ms (target: <10ms)",
                list_time.as_millis());
        }

        let passed = registration_ok && list_ok;

        if passed {
            log::info!("    ✅ Model registration: PASSED");
        } else {
            log::warn!("    ❌ Model registration: FAILED");
            log::debug!("       Registration output: {}", output.raw_output);
            log::debug!("       List output: {}", list_output.raw_output);
        }

        Ok(passed)
    }

    /// Test 1.2: Hot-Swap (Zero Downtime)
    ///
    /// **Objective:** Validate model hot-swap with zero downtime.
    ///
    /// **Steps:**
    /// 1. Load model-v1
    /// 2. Start continuous inference workload
    /// 3. Perform hot-swap to model-v2
    /// 4. Verify no inference failures during swap
    ///
    /// **Expected Output:**
    /// ```text
    /// Hot-swap initiated: model-v1 → model-v2
    /// Draining in-flight requests...
    /// Swap complete. Downtime: 0ms
    /// ```
    ///
    /// **Metrics:**
    /// - Swap time < 500ms
    /// - Zero dropped requests
    async fn test_model_hot_swap(&mut self) -> Result<bool, Box<dyn Error>> {
        log::info!("  Testing model hot-swap...");

        // Load initial model
        let _ = self.kernel_interface
            .execute_command("llmctl load --id model-v1")
            .await;

        // Note: In a real implementation, we would start a background
        // inference workload here. For now, we test the swap command itself.

        let start = std::time::Instant::now();
        let output = self.kernel_interface
            .execute_command("llmctl swap --from model-v1 --to model-v2")
            .await?;
        let swap_time = start.elapsed();

        // Check for hot-swap indicators
        let swap_ok = output.raw_output.contains("swap") ||
                     output.raw_output.contains("Hot-swap") ||
                     output.raw_output.contains("model-v2") ||
                     output.raw_output.contains("Swap complete");

        // Verify zero downtime claim if present
        let downtime_ok = !output.raw_output.contains("Downtime:") ||
                         output.raw_output.contains("Downtime: 0");

        // Check swap time
        let timing_ok = swap_time < Duration::from_millis(500);

        if !timing_ok {
            log::warn!("    ⚠️  Hot-swap took {}ms (target: <500ms)",
                swap_time.as_millis());
        }

        let passed = swap_ok && downtime_ok;

        if passed {
            log::info!("    ✅ Model hot-swap: PASSED");
        } else {
            log::warn!("    ❌ Model hot-swap: FAILED");
            log::debug!("       Output: {}", output.raw_output);
        }

        Ok(passed)
    }

    /// Test 1.3: Rollback
    ///
    /// **Objective:** Validate model rollback to previous version.
    ///
    /// **Steps:**
    /// 1. Load model-v2
    /// 2. Trigger rollback to model-v1
    /// 3. Verify model-v1 is now active
    ///
    /// **Expected Output:**
    /// ```text
    /// Rollback triggered: model-v2 → model-v1
    /// Rollback complete. Active model: model-v1
    /// ```
    ///
    /// **Metrics:**
    /// - Rollback time < 200ms
    async fn test_model_rollback(&mut self) -> Result<bool, Box<dyn Error>> {
        log::info!("  Testing model rollback...");

        // Ensure model-v2 is loaded
        let _ = self.kernel_interface
            .execute_command("llmctl load --id model-v2")
            .await;

        // Perform rollback
        let start = std::time::Instant::now();
        let output = self.kernel_interface
            .execute_command("llmctl rollback --to model-v1")
            .await?;
        let rollback_time = start.elapsed();

        // Check for rollback indicators
        let rollback_ok = output.raw_output.contains("rollback") ||
                         output.raw_output.contains("Rollback") ||
                         output.raw_output.contains("model-v1") ||
                         output.raw_output.contains("Active model");

        // Check rollback time
        let timing_ok = rollback_time < Duration::from_millis(200);

        if !timing_ok {
            log::warn!("    ⚠️  Rollback took {}ms (target: <200ms)",
                rollback_time.as_millis());
        }

        let passed = rollback_ok;

        if passed {
            log::info!("    ✅ Model rollback: PASSED");
        } else {
            log::warn!("    ❌ Model rollback: FAILED");
            log::debug!("       Output: {}", output.raw_output);
        }

        Ok(passed)
    }

    /// Test 1.4: Multi-Model Registry
    ///
    /// **Objective:** Validate registry operations scale linearly.
    ///
    /// **Steps:**
    /// 1. Register 10 models
    /// 2. List all models
    /// 3. Query individual models
    /// 4. Delete models
    ///
    /// **Metrics:**
    /// - List time < 50ms (10 models)
    /// - Query time < 10ms per model
    /// - Delete time < 20ms per model
    async fn test_multi_model_management(&mut self) -> Result<bool, Box<dyn Error>> {
        log::info!("  Testing multi-model management...");

        // Register multiple models
        for i in 1..=10 {
            let cmd = format!("llmctl register --id model-{} --size {} --ctx 2048",
                i, 256 + i * 32);
            let _ = self.kernel_interface.execute_command(&cmd).await;
        }

        // Test list performance
        let start = std::time::Instant::now();
        let list_output = self.kernel_interface
            .execute_command("llmctl list")
            .await?;
        let list_time = start.elapsed();

        let list_ok = list_output.raw_output.contains("model") || list_output.raw_output.contains("Registry");
        let list_timing_ok = list_time < Duration::from_millis(50);

        if !list_timing_ok {
            log::warn!("    ⚠️  List took {}ms for 10 models (target: <50ms)",
                list_time.as_millis());
        }

        // Test query performance
        let query_start = std::time::Instant::now();
        let _ = self.kernel_interface
            .execute_command("llmctl query --id model-5")
            .await;
        let query_time = query_start.elapsed();

        let query_timing_ok = query_time < Duration::from_millis(10);

        if !query_timing_ok {
            log::warn!("    ⚠️  Query took {}ms (target: <10ms)",
                query_time.as_millis());
        }

        let passed = list_ok && list_timing_ok;

        if passed {
            log::info!("    ✅ Multi-model management: PASSED");
        } else {
            log::warn!("    ❌ Multi-model management: FAILED");
        }

        Ok(passed)
    }

    /// Run all model lifecycle tests
    pub async fn run_all_tests(&mut self) -> Result<ModelLifecycleTestResults, Box<dyn Error>> {
        log::info!("Running Model Lifecycle Tests...");

        let registration_passed = self.test_model_registration().await.unwrap_or(false);
        let hot_swap_passed = self.test_model_hot_swap().await.unwrap_or(false);
        let rollback_passed = self.test_model_rollback().await.unwrap_or(false);
        let multi_model_passed = self.test_multi_model_management().await.unwrap_or(false);

        let total_tests = 4;
        let passed_tests = vec![
            registration_passed,
            hot_swap_passed,
            rollback_passed,
            multi_model_passed,
        ]
        .iter()
        .filter(|&&p| p)
        .count() as u32;

        let passed = passed_tests >= (total_tests as f32 * 0.75) as u32; // 75% pass threshold

        log::info!("Model Lifecycle Tests: {}/{} passed ({}%)",
            passed_tests, total_tests, (passed_tests * 100) / total_tests);

        Ok(ModelLifecycleTestResults {
            passed,
            registration_passed,
            hot_swap_passed,
            rollback_passed,
            multi_model_passed,
            total_tests,
            passed_tests,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_metadata() {
        let model = ModelMetadata {
            id: "test-model".to_string(),
            size_kb: 512,
            context_size: 2048,
        };
        assert_eq!(model.id, "test-model");
        assert_eq!(model.size_kb, 512);
    }
}
