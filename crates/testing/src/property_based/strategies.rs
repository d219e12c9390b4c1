// SIS Kernel Property Testing Strategies
// Advanced testing strategies and property composition

use proptest::prelude::*;
use proptest::strategy::ValueTree;
use crate::property_based::generators::*;

pub struct TestingStrategies;

impl TestingStrategies {
    pub fn memory_safety_strategy() -> impl Strategy<Value = MemorySafetyScenario> {
        (
            allocation_sequence(),
            memory_access_sequence(),
            allocation_pattern(),
            prop::collection::vec(1usize..=4096, 1..=100)
        ).prop_map(|(alloc_seq, access_seq, pattern, random_accesses)| {
            MemorySafetyScenario {
                allocation_sequence: alloc_seq,
                access_sequence: access_seq, 
                fragmentation_pattern: pattern,
                stress_test_sizes: random_accesses,
                corruption_test_enabled: true,
                double_free_test_enabled: true,
                use_after_free_test_enabled: true,
            }
        })
    }

    pub fn concurrency_stress_strategy() -> impl Strategy<Value = ConcurrencyStressScenario> {
        (
            process_scheduling_sequence(),
            concurrent_operation_sequence(),
            prop::collection::vec(1u8..=10, 1..=20), // thread priorities
            prop::collection::vec(1u32..=1000, 1..=50), // lock IDs
            1usize..=100, // contention level
        ).prop_map(|(sched_seq, concurrent_ops, priorities, locks, contention)| {
            ConcurrencyStressScenario {
                scheduling_sequence: sched_seq,
                concurrent_operations: concurrent_ops,
                thread_priorities: priorities,
                lock_contention_ids: locks,
                contention_level: contention,
                deadlock_detection_enabled: true,
                priority_inversion_testing: true,
                starvation_detection: true,
            }
        })
    }

    pub fn system_resilience_strategy() -> impl Strategy<Value = SystemResilienceScenario> {
        (
            filesystem_operation_sequence(),
            ipc_message_sequence(),
            prop::collection::vec(0u8..=255, 0..=10000), // fault injection points
            1f64..=100.0, // load multiplier
            any::<bool>(), // enable fault injection
        ).prop_map(|(fs_ops, ipc_ops, fault_points, load, inject_faults)| {
            SystemResilienceScenario {
                filesystem_operations: fs_ops,
                ipc_operations: ipc_ops,
                fault_injection_points: fault_points,
                system_load_multiplier: load,
                enable_fault_injection: inject_faults,
                crash_recovery_testing: true,
                resource_exhaustion_testing: true,
                network_partition_simulation: true,
            }
        })
    }

    pub fn security_property_strategy() -> impl Strategy<Value = SecurityTestScenario> {
        (
            prop::collection::vec(1u32..=1000, 1..=50), // user IDs  
            prop::collection::vec("(read|write|execute|admin)", 1..=20), // permissions
            prop::collection::vec("/[a-z/]{5,30}", 1..=100), // resource paths
            prop::collection::vec(0u8..=255, 0..=1024), // data payloads
            1u8..=10, // security levels
        ).prop_map(|(user_ids, permissions, resources, payloads, max_security_level)| {
            SecurityTestScenario {
                user_identities: user_ids,
                permission_sets: permissions,
                protected_resources: resources,
                test_payloads: payloads,
                max_security_level,
                privilege_escalation_tests: true,
                information_flow_tests: true,
                access_control_bypass_tests: true,
                side_channel_tests: true,
            }
        })
    }

    pub fn performance_boundary_strategy() -> impl Strategy<Value = PerformanceBoundaryScenario> {
        (
            1usize..=10000, // operation count
            1u64..=1_000_000, // data size range
            1f64..=100.0, // load factor
            prop::collection::vec(1u32..=10000, 1..=1000), // timing constraints
            any::<bool>(), // enable resource monitoring
        ).prop_map(|(ops, data_size, load, timing, monitor)| {
            PerformanceBoundaryScenario {
                operation_count: ops,
                max_data_size: data_size,
                load_factor: load,
                timing_constraints_microseconds: timing,
                enable_resource_monitoring: monitor,
                memory_pressure_testing: true,
                cpu_saturation_testing: true,
                io_bottleneck_testing: true,
                cache_pressure_testing: true,
            }
        })
    }

    pub fn complex_integration_strategy() -> impl Strategy<Value = IntegrationTestScenario> {
        (
            Self::memory_safety_strategy(),
            Self::concurrency_stress_strategy(),
            Self::system_resilience_strategy(),
            Self::security_property_strategy(),
            Self::performance_boundary_strategy(),
            1usize..=10, // complexity level
        ).prop_map(|(memory, concurrency, resilience, security, performance, complexity)| {
            IntegrationTestScenario {
                memory_scenario: memory,
                concurrency_scenario: concurrency,
                resilience_scenario: resilience,
                security_scenario: security,
                performance_scenario: performance,
                complexity_level: complexity,
                cross_component_interaction_testing: true,
                emergent_behavior_detection: true,
                system_level_invariant_checking: true,
            }
        })
    }
}

#[derive(Debug, Clone)]
pub struct MemorySafetyScenario {
    pub allocation_sequence: AllocationSequence,
    pub access_sequence: MemoryAccessSequence,
    pub fragmentation_pattern: AllocationPattern,
    pub stress_test_sizes: Vec<usize>,
    pub corruption_test_enabled: bool,
    pub double_free_test_enabled: bool,
    pub use_after_free_test_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct ConcurrencyStressScenario {
    pub scheduling_sequence: ProcessSchedulingSequence,
    pub concurrent_operations: ConcurrentOperationSequence,
    pub thread_priorities: Vec<u8>,
    pub lock_contention_ids: Vec<u32>,
    pub contention_level: usize,
    pub deadlock_detection_enabled: bool,
    pub priority_inversion_testing: bool,
    pub starvation_detection: bool,
}

#[derive(Debug, Clone)]
pub struct SystemResilienceScenario {
    pub filesystem_operations: FileSystemOperationSequence,
    pub ipc_operations: IPCMessageSequence,
    pub fault_injection_points: Vec<u8>,
    pub system_load_multiplier: f64,
    pub enable_fault_injection: bool,
    pub crash_recovery_testing: bool,
    pub resource_exhaustion_testing: bool,
    pub network_partition_simulation: bool,
}

#[derive(Debug, Clone)]
pub struct SecurityTestScenario {
    pub user_identities: Vec<u32>,
    pub permission_sets: Vec<String>,
    pub protected_resources: Vec<String>,
    pub test_payloads: Vec<u8>,
    pub max_security_level: u8,
    pub privilege_escalation_tests: bool,
    pub information_flow_tests: bool,
    pub access_control_bypass_tests: bool,
    pub side_channel_tests: bool,
}

#[derive(Debug, Clone)]
pub struct PerformanceBoundaryScenario {
    pub operation_count: usize,
    pub max_data_size: u64,
    pub load_factor: f64,
    pub timing_constraints_microseconds: Vec<u32>,
    pub enable_resource_monitoring: bool,
    pub memory_pressure_testing: bool,
    pub cpu_saturation_testing: bool,
    pub io_bottleneck_testing: bool,
    pub cache_pressure_testing: bool,
}

#[derive(Debug, Clone)]
pub struct IntegrationTestScenario {
    pub memory_scenario: MemorySafetyScenario,
    pub concurrency_scenario: ConcurrencyStressScenario,
    pub resilience_scenario: SystemResilienceScenario,
    pub security_scenario: SecurityTestScenario,
    pub performance_scenario: PerformanceBoundaryScenario,
    pub complexity_level: usize,
    pub cross_component_interaction_testing: bool,
    pub emergent_behavior_detection: bool,
    pub system_level_invariant_checking: bool,
}

pub struct PropertyComposition;

impl PropertyComposition {
    pub fn compose_safety_and_liveness<P1, P2>(
        safety_property: P1,
        liveness_property: P2,
    ) -> impl Fn(&TestingContext) -> bool
    where
        P1: Fn(&TestingContext) -> bool,
        P2: Fn(&TestingContext) -> bool,
    {
        move |ctx: &TestingContext| {
            safety_property(ctx) && liveness_property(ctx)
        }
    }

    pub fn temporal_property<P>(
        base_property: P,
        temporal_constraint: TemporalConstraint,
    ) -> impl Fn(&[TestingContext]) -> bool
    where
        P: Fn(&TestingContext) -> bool,
    {
        move |contexts: &[TestingContext]| {
            match &temporal_constraint {
                TemporalConstraint::Always => {
                    contexts.iter().all(&base_property)
                }
                TemporalConstraint::Eventually => {
                    contexts.iter().any(&base_property)
                }
                TemporalConstraint::Until(condition) => {
                    let mut satisfied = true;
                    for ctx in contexts {
                        if condition(ctx) {
                            break;
                        }
                        if !base_property(ctx) {
                            satisfied = false;
                            break;
                        }
                    }
                    satisfied
                }
                TemporalConstraint::Since(condition) => {
                    let mut found_condition = false;
                    let mut satisfied = true;
                    for ctx in contexts {
                        if condition(ctx) {
                            found_condition = true;
                        }
                        if found_condition && !base_property(ctx) {
                            satisfied = false;
                            break;
                        }
                    }
                    satisfied
                }
            }
        }
    }

    pub fn invariant_under_perturbation<P, F>(
        property: P,
        perturbation: F,
    ) -> impl Fn(&TestingContext) -> bool
    where
        P: Fn(&TestingContext) -> bool,
        F: Fn(&TestingContext) -> TestingContext,
    {
        move |ctx: &TestingContext| {
            let original_holds = property(ctx);
            let perturbed_ctx = perturbation(ctx);
            let perturbed_holds = property(&perturbed_ctx);
            
            original_holds && perturbed_holds
        }
    }
}

pub enum TemporalConstraint {
    Always,
    Eventually, 
    Until(Box<dyn Fn(&TestingContext) -> bool>),
    Since(Box<dyn Fn(&TestingContext) -> bool>),
}

impl std::fmt::Debug for TemporalConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Always => write!(f, "Always"),
            Self::Eventually => write!(f, "Eventually"),
            Self::Until(_) => write!(f, "Until(...)"),
            Self::Since(_) => write!(f, "Since(...)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TestingContext {
    pub memory_state: MemoryState,
    pub process_state: ProcessState,
    pub concurrency_state: ConcurrencyState,
    pub system_resources: SystemResources,
    pub security_context: SecurityContext,
    pub timestamp: u64,
}

#[derive(Debug, Clone)]
pub struct MemoryState {
    pub allocated_blocks: std::collections::HashMap<u32, usize>,
    pub free_blocks: std::collections::HashSet<u32>,
    pub fragmentation_ratio: f64,
    pub total_memory_used: usize,
}

#[derive(Debug, Clone)]
pub struct ProcessState {
    pub running_processes: std::collections::HashMap<u32, ProcessInfo>,
    pub process_queue: Vec<u32>,
    pub context_switches: u64,
    pub scheduler_state: String,
}

#[derive(Debug, Clone)]
pub struct ProcessInfo {
    pub pid: u32,
    pub priority: u8,
    pub state: String,
    pub memory_usage: usize,
    pub cpu_time_used: u64,
}

#[derive(Debug, Clone)]
pub struct ConcurrencyState {
    pub active_locks: std::collections::HashMap<String, u32>, // lock_id -> holder_pid
    pub waiting_queue: std::collections::HashMap<String, Vec<u32>>, // lock_id -> waiting_pids
    pub deadlock_detected: bool,
    pub lock_acquisition_order: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SystemResources {
    pub available_memory: usize,
    pub cpu_utilization: f64,
    pub open_file_handles: usize,
    pub network_connections: usize,
    pub disk_io_pressure: f64,
}

#[derive(Debug, Clone)]
pub struct SecurityContext {
    pub current_user: u32,
    pub active_permissions: Vec<String>,
    pub security_level: u8,
    pub access_violations: Vec<String>,
    pub privilege_escalation_attempts: u32,
}

impl Default for TestingContext {
    fn default() -> Self {
        Self {
            memory_state: MemoryState {
                allocated_blocks: std::collections::HashMap::new(),
                free_blocks: std::collections::HashSet::new(),
                fragmentation_ratio: 0.0,
                total_memory_used: 0,
            },
            process_state: ProcessState {
                running_processes: std::collections::HashMap::new(),
                process_queue: Vec::new(),
                context_switches: 0,
                scheduler_state: "IDLE".to_string(),
            },
            concurrency_state: ConcurrencyState {
                active_locks: std::collections::HashMap::new(),
                waiting_queue: std::collections::HashMap::new(),
                deadlock_detected: false,
                lock_acquisition_order: Vec::new(),
            },
            system_resources: SystemResources {
                available_memory: 1024 * 1024 * 1024, // 1GB
                cpu_utilization: 0.0,
                open_file_handles: 0,
                network_connections: 0,
                disk_io_pressure: 0.0,
            },
            security_context: SecurityContext {
                current_user: 1000,
                active_permissions: vec!["read".to_string(), "write".to_string()],
                security_level: 1,
                access_violations: Vec::new(),
                privilege_escalation_attempts: 0,
            },
            timestamp: 0,
        }
    }
}

pub struct AdvancedPropertyTestRunner;

impl AdvancedPropertyTestRunner {
    pub fn run_metamorphic_testing<T, P, M>(
        input_generator: impl Strategy<Value = T>,
        property: P,
        metamorphic_relation: M,
        test_cases: u32,
    ) -> quickcheck::TestResult
    where
        T: Clone + std::fmt::Debug,
        P: Fn(&T) -> bool,
        M: Fn(&T) -> T,
    {
        
        let mut failures = 0;
        for _ in 0..test_cases {
            let test_input = input_generator.new_tree(&mut proptest::test_runner::TestRunner::default())
                .unwrap()
                .current();
            
            let original_result = property(&test_input);
            let transformed_input = metamorphic_relation(&test_input);
            let transformed_result = property(&transformed_input);
            
            if original_result != transformed_result {
                failures += 1;
            }
        }
        
        if failures > 0 {
            quickcheck::TestResult::failed()
        } else {
            quickcheck::TestResult::passed()
        }
    }

    pub fn run_differential_testing<T, F1, F2>(
        input_generator: impl Strategy<Value = T>,
        implementation1: F1,
        implementation2: F2,
        test_cases: u32,
    ) -> quickcheck::TestResult
    where
        T: Clone + std::fmt::Debug,
        F1: Fn(&T) -> String,
        F2: Fn(&T) -> String,
    {
        let mut differences = 0;
        for _ in 0..test_cases {
            let test_input = input_generator.new_tree(&mut proptest::test_runner::TestRunner::default())
                .unwrap()
                .current();
            
            let result1 = implementation1(&test_input);
            let result2 = implementation2(&test_input);
            
            if result1 != result2 {
                differences += 1;
            }
        }
        
        if differences > 0 {
            quickcheck::TestResult::failed()
        } else {
            quickcheck::TestResult::passed()
        }
    }
}