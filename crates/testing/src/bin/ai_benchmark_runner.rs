// SIS Kernel AI Benchmark Runner
// Industry-grade AI benchmark execution and reporting

use sis_testing::{
    TestSuiteConfig,
    ai::{AIBenchmarkSuite, AIBenchmarkReporter},
    setup_logging
};
use std::path::Path;
use tokio::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();
    
    log::info!("SIS Kernel AI Benchmark Suite");
    log::info!("=============================");
    log::info!("Industry-Grade AI Performance Validation");
    log::info!("");
    
    // Configuration for comprehensive benchmarking
    let config = TestSuiteConfig {
        qemu_nodes: 1, // AI benchmarks run on single node
        test_duration_secs: 300, // 5 minutes for comprehensive benchmarks
        performance_iterations: 10000, // High sample count for statistical significance
        statistical_confidence: 0.99, // 99% confidence intervals
        output_directory: "target/testing/ai_benchmarks".to_string(),
        generate_reports: true,
        parallel_execution: true,
    };
    
    log::info!("Benchmark Configuration:");
    log::info!("  Performance Iterations: {}", config.performance_iterations);
    log::info!("  Statistical Confidence: {:.1}%", config.statistical_confidence * 100.0);
    log::info!("  Test Duration: {}s", config.test_duration_secs);
    log::info!("  Output Directory: {}", config.output_directory);
    log::info!("");
    
    // Create output directory
    let output_path = Path::new(&config.output_directory);
    fs::create_dir_all(&output_path).await?;
    
    // Initialize AI benchmark suite
    let ai_benchmark_suite = AIBenchmarkSuite::new(&config);
    
    log::info!("Starting comprehensive AI benchmarks...");
    log::info!("This will measure performance against industry baselines:");
    log::info!("  - TensorFlow Lite (Mobile AI Framework)");
    log::info!("  - ONNX Runtime (Cross-platform inference)");
    log::info!("  - PyTorch Mobile (Mobile deep learning)");
    log::info!("  - Google Edge TPU (Hardware acceleration)");
    log::info!("  - Apple CoreML (iOS/macOS inference)");
    log::info!("");
    
    // Execute comprehensive benchmarks
    let start_time = std::time::Instant::now();
    
    match ai_benchmark_suite.run_comprehensive_ai_benchmarks().await {
        Ok(benchmark_results) => {
            let total_duration = start_time.elapsed();
            
            log::info!("=== BENCHMARK RESULTS ===");
            log::info!("Total execution time: {:.2}s", total_duration.as_secs_f64());
            log::info!("");
            
            // Display key metrics
            let neural_p99 = benchmark_results.inference_latency.neural_engine_latency_us
                .percentiles.get(&99).unwrap_or(&0.0);
            let neural_mean = benchmark_results.inference_latency.neural_engine_latency_us.mean;
            
            log::info!("AI Inference Performance:");
            log::info!("  Neural Engine P99 Latency: {:.2}μs (Target: <40μs)", neural_p99);
            log::info!("  Neural Engine Mean Latency: {:.2}μs", neural_mean);
            log::info!("  CPU Fallback P99 Latency: {:.2}μs", 
                      benchmark_results.inference_latency.cpu_fallback_latency_us.percentiles.get(&99).unwrap_or(&0.0));
            log::info!("");
            
            log::info!("Throughput Metrics:");
            log::info!("  Single-thread: {:.0} inferences/second", benchmark_results.throughput_metrics.inferences_per_second);
            log::info!("  Sustained: {:.0} inferences/second", benchmark_results.throughput_metrics.sustained_throughput);
            log::info!("  Peak: {:.0} inferences/second", benchmark_results.throughput_metrics.peak_throughput);
            log::info!("");
            
            log::info!("Memory Efficiency:");
            log::info!("  Model Memory: {:.1}MB", benchmark_results.memory_efficiency.model_memory_usage_mb);
            log::info!("  Peak Inference Memory: {:.1}MB", benchmark_results.memory_efficiency.peak_inference_memory_mb);
            log::info!("  Fragmentation: {:.1}%", benchmark_results.memory_efficiency.memory_fragmentation_ratio * 100.0);
            log::info!("");
            
            log::info!("Power Efficiency:");
            log::info!("  Energy per Inference: {:.2}mJ", benchmark_results.power_efficiency.energy_per_inference_mj);
            log::info!("  Thermal Efficiency: {:.1}%", benchmark_results.power_efficiency.thermal_efficiency * 100.0);
            log::info!("  DVFS Adaptation: {:.1}μs", benchmark_results.power_efficiency.dvfs_adaptation_time_us);
            log::info!("");
            
            log::info!("=== INDUSTRY COMPARISONS ===");
            
            // TensorFlow Lite comparison
            let tf_comparison = &benchmark_results.industry_comparisons.tensorflow_lite_comparison;
            log::info!("vs TensorFlow Lite:");
            log::info!("  Latency: {:.0}x faster", tf_comparison.latency_improvement_factor);
            log::info!("  Throughput: {:.0}x higher", tf_comparison.throughput_improvement_factor);
            log::info!("  Power: {:.1}x more efficient", tf_comparison.power_efficiency_factor);
            log::info!("");
            
            // ONNX Runtime comparison
            let onnx_comparison = &benchmark_results.industry_comparisons.onnx_runtime_comparison;
            log::info!("vs ONNX Runtime:");
            log::info!("  Latency: {:.0}x faster", onnx_comparison.latency_improvement_factor);
            log::info!("  Throughput: {:.0}x higher", onnx_comparison.throughput_improvement_factor);
            log::info!("  Power: {:.1}x more efficient", onnx_comparison.power_efficiency_factor);
            log::info!("");
            
            // Apple CoreML comparison
            let coreml_comparison = &benchmark_results.industry_comparisons.apple_coreml_comparison;
            log::info!("vs Apple CoreML:");
            log::info!("  Latency: {:.1}x faster", coreml_comparison.latency_improvement_factor);
            log::info!("  Throughput: {:.1}x higher", coreml_comparison.throughput_improvement_factor);
            log::info!("  Power: {:.1}x more efficient", coreml_comparison.power_efficiency_factor);
            log::info!("");
            
            // Validation status
            let validation_passed = *neural_p99 < 40.0 && 
                                   benchmark_results.throughput_metrics.inferences_per_second > 25000.0 &&
                                   benchmark_results.accuracy_validation.model_accuracy > 0.999;
            
            if validation_passed {
                log::info!("VALIDATION PASSED");
                log::info!("  All performance targets met");
                log::info!("  Ready for industry presentation");
            } else {
                log::warn!("VALIDATION PARTIAL");
                log::warn!("  Some targets not fully met");
                log::warn!("  Review recommendations");
            }
            log::info!("");
            
            // Generate comprehensive report
            log::info!("Generating industry-grade report...");
            let report = AIBenchmarkReporter::generate_comprehensive_report(&benchmark_results, &config)?;
            
            // Save JSON report
            let json_report_path = output_path.join("ai_benchmark_report.json");
            let json_content = serde_json::to_string_pretty(&report)?;
            fs::write(&json_report_path, json_content).await?;
            log::info!("JSON report saved: {}", json_report_path.display());
            
            // Generate HTML report
            let html_content = AIBenchmarkReporter::generate_html_report(&report)?;
            let html_report_path = output_path.join("ai_benchmark_dashboard.html");
            fs::write(&html_report_path, html_content).await?;
            log::info!("HTML dashboard saved: {}", html_report_path.display());
            
            // Save raw benchmark data
            let raw_data_path = output_path.join("raw_benchmark_data.json");
            let raw_json = serde_json::to_string_pretty(&benchmark_results)?;
            fs::write(&raw_data_path, raw_json).await?;
            log::info!("Raw data saved: {}", raw_data_path.display());
            
            log::info!("");
            log::info!("=== SUMMARY ===");
            log::info!("Overall Score: {:.1}%", report.executive_summary.overall_score);
            log::info!("Validation Status: {:?}", report.executive_summary.validation_status);
            log::info!("");
            log::info!("Key Achievements:");
            for achievement in &report.executive_summary.key_achievements {
                log::info!("  • {}", achievement);
            }
            log::info!("");
            log::info!("Industry Leadership:");
            for leadership in &report.executive_summary.industry_leadership {
                log::info!("  • {}", leadership);
            }
            log::info!("");
            
            if report.executive_summary.overall_score >= 90.0 {
                log::info!("SUCCESS: SIS Kernel demonstrates industry-leading AI performance!");
                log::info!("Ready for presentations to FAANG and enterprise customers.");
            } else if report.executive_summary.overall_score >= 70.0 {
                log::info!("GOOD: Strong AI performance with opportunities for optimization.");
            } else {
                log::warn!("NEEDS WORK: Performance improvements required before industry presentation.");
            }
            
            log::info!("");
            log::info!("View detailed results:");
            log::info!("  Dashboard: {}", html_report_path.display());
            log::info!("  JSON Report: {}", json_report_path.display());
            log::info!("  Raw Data: {}", raw_data_path.display());
            
            // Print performance claims suitable for README/presentations
            log::info!("");
            log::info!("=== PERFORMANCE CLAIMS (Ready for Documentation) ===");
            for claim in &report.performance_claims {
                log::info!("• {} ({})", claim.claim, claim.measurement);
                log::info!("  Validation: {} ({:.0}% confidence)", claim.validation_method, claim.confidence_level * 100.0);
                log::info!("  Industry: {}", claim.industry_comparison);
                log::info!("");
            }
            
            std::process::exit(0);
        }
        Err(e) => {
            log::error!("Benchmark execution failed: {}", e);
            log::error!("Check configuration and system resources");
            std::process::exit(1);
        }
    }
}