//! MITRE ATT&CK Catalog
//!
//! Small technique database used to name techniques and group them by
//! tactic in summaries, activity-group profiles, intel extraction and
//! training recommendations.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MitreTactic {
    Reconnaissance,
    ResourceDevelopment,
    InitialAccess,
    Execution,
    Persistence,
    PrivilegeEscalation,
    DefenseEvasion,
    CredentialAccess,
    Discovery,
    LateralMovement,
    Collection,
    CommandAndControl,
    Exfiltration,
    Impact,
}

impl MitreTactic {
    pub fn as_str(&self) -> &'static str {
        match self {
            MitreTactic::Reconnaissance => "Reconnaissance",
            MitreTactic::ResourceDevelopment => "Resource Development",
            MitreTactic::InitialAccess => "Initial Access",
            MitreTactic::Execution => "Execution",
            MitreTactic::Persistence => "Persistence",
            MitreTactic::PrivilegeEscalation => "Privilege Escalation",
            MitreTactic::DefenseEvasion => "Defense Evasion",
            MitreTactic::CredentialAccess => "Credential Access",
            MitreTactic::Discovery => "Discovery",
            MitreTactic::LateralMovement => "Lateral Movement",
            MitreTactic::Collection => "Collection",
            MitreTactic::CommandAndControl => "Command and Control",
            MitreTactic::Exfiltration => "Exfiltration",
            MitreTactic::Impact => "Impact",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            MitreTactic::Reconnaissance => "TA0043",
            MitreTactic::ResourceDevelopment => "TA0042",
            MitreTactic::InitialAccess => "TA0001",
            MitreTactic::Execution => "TA0002",
            MitreTactic::Persistence => "TA0003",
            MitreTactic::PrivilegeEscalation => "TA0004",
            MitreTactic::DefenseEvasion => "TA0005",
            MitreTactic::CredentialAccess => "TA0006",
            MitreTactic::Discovery => "TA0007",
            MitreTactic::LateralMovement => "TA0008",
            MitreTactic::Collection => "TA0009",
            MitreTactic::CommandAndControl => "TA0011",
            MitreTactic::Exfiltration => "TA0010",
            MitreTactic::Impact => "TA0040",
        }
    }
}

impl std::fmt::Display for MitreTactic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MitreTechnique {
    pub id: &'static str,
    pub name: &'static str,
    pub tactic: MitreTactic,
}

// ============================================================================
// TECHNIQUE DATABASE
// ============================================================================

const TECHNIQUES: &[(&str, &str, MitreTactic)] = &[
    // Reconnaissance / resource development
    ("T1589", "Gather Victim Identity Information", MitreTactic::Reconnaissance),
    ("T1593", "Search Open Websites/Domains", MitreTactic::Reconnaissance),
    ("T1598", "Phishing for Information", MitreTactic::Reconnaissance),
    ("T1585", "Establish Accounts", MitreTactic::ResourceDevelopment),
    ("T1586", "Compromise Accounts", MitreTactic::ResourceDevelopment),
    ("T1588", "Obtain Capabilities", MitreTactic::ResourceDevelopment),
    // Initial access
    ("T1566", "Phishing", MitreTactic::InitialAccess),
    ("T1566.001", "Spearphishing Attachment", MitreTactic::InitialAccess),
    ("T1566.002", "Spearphishing Link", MitreTactic::InitialAccess),
    ("T1566.003", "Spearphishing via Service", MitreTactic::InitialAccess),
    ("T1566.004", "Spearphishing Voice", MitreTactic::InitialAccess),
    ("T1190", "Exploit Public-Facing Application", MitreTactic::InitialAccess),
    ("T1133", "External Remote Services", MitreTactic::InitialAccess),
    ("T1189", "Drive-by Compromise", MitreTactic::InitialAccess),
    ("T1195", "Supply Chain Compromise", MitreTactic::InitialAccess),
    ("T1078", "Valid Accounts", MitreTactic::InitialAccess),
    // Execution
    ("T1059", "Command and Scripting Interpreter", MitreTactic::Execution),
    ("T1059.001", "PowerShell", MitreTactic::Execution),
    ("T1059.003", "Windows Command Shell", MitreTactic::Execution),
    ("T1204", "User Execution", MitreTactic::Execution),
    ("T1204.001", "Malicious Link", MitreTactic::Execution),
    ("T1204.002", "Malicious File", MitreTactic::Execution),
    // Persistence / privilege escalation
    ("T1547", "Boot or Logon Autostart Execution", MitreTactic::Persistence),
    ("T1053", "Scheduled Task/Job", MitreTactic::Persistence),
    ("T1098", "Account Manipulation", MitreTactic::Persistence),
    ("T1068", "Exploitation for Privilege Escalation", MitreTactic::PrivilegeEscalation),
    // Defense evasion
    ("T1055", "Process Injection", MitreTactic::DefenseEvasion),
    ("T1027", "Obfuscated Files or Information", MitreTactic::DefenseEvasion),
    ("T1036", "Masquerading", MitreTactic::DefenseEvasion),
    ("T1218", "System Binary Proxy Execution", MitreTactic::DefenseEvasion),
    // Credential access
    ("T1003", "OS Credential Dumping", MitreTactic::CredentialAccess),
    ("T1110", "Brute Force", MitreTactic::CredentialAccess),
    ("T1111", "Multi-Factor Authentication Interception", MitreTactic::CredentialAccess),
    ("T1556", "Modify Authentication Process", MitreTactic::CredentialAccess),
    ("T1621", "Multi-Factor Authentication Request Generation", MitreTactic::CredentialAccess),
    // Discovery / lateral movement
    ("T1087", "Account Discovery", MitreTactic::Discovery),
    ("T1082", "System Information Discovery", MitreTactic::Discovery),
    ("T1021", "Remote Services", MitreTactic::LateralMovement),
    ("T1534", "Internal Spearphishing", MitreTactic::LateralMovement),
    // Collection / C2 / exfiltration
    ("T1056", "Input Capture", MitreTactic::Collection),
    ("T1114", "Email Collection", MitreTactic::Collection),
    ("T1071", "Application Layer Protocol", MitreTactic::CommandAndControl),
    ("T1105", "Ingress Tool Transfer", MitreTactic::CommandAndControl),
    ("T1041", "Exfiltration Over C2 Channel", MitreTactic::Exfiltration),
    ("T1567", "Exfiltration Over Web Service", MitreTactic::Exfiltration),
    // Impact
    ("T1486", "Data Encrypted for Impact", MitreTactic::Impact),
    ("T1490", "Inhibit System Recovery", MitreTactic::Impact),
    ("T1498", "Network Denial of Service", MitreTactic::Impact),
    ("T1657", "Financial Theft", MitreTactic::Impact),
];

pub static MITRE_TECHNIQUES: Lazy<HashMap<&'static str, MitreTechnique>> = Lazy::new(|| {
    TECHNIQUES
        .iter()
        .map(|&(id, name, tactic)| (id, MitreTechnique { id, name, tactic }))
        .collect()
});

// ============================================================================
// LOOKUP
// ============================================================================

/// Resolve a technique id; sub-techniques fall back to their parent.
///
/// Accepts ids embedded in longer labels ("T1566.001 - Spearphishing").
pub fn lookup(technique: &str) -> Option<MitreTechnique> {
    let id = technique_id(technique)?;
    if let Some(t) = MITRE_TECHNIQUES.get(id.as_str()) {
        return Some(*t);
    }
    let parent = id.split('.').next()?;
    MITRE_TECHNIQUES.get(parent).copied()
}

/// Tactic of a technique, if known
pub fn tactic_of(technique: &str) -> Option<MitreTactic> {
    lookup(technique).map(|t| t.tactic)
}

/// "T1566 (Phishing)" when known, the raw label otherwise
pub fn display_name(technique: &str) -> String {
    match lookup(technique) {
        Some(t) if !technique.contains(t.name) => format!("{} ({})", technique, t.name),
        _ => technique.to_string(),
    }
}

/// Leading ATT&CK id of a label, upper-cased ("t1059.001 foo" -> "T1059.001")
pub fn technique_id(label: &str) -> Option<String> {
    let head = label.trim().split(|c: char| c.is_whitespace() || c == ':' || c == ',').next()?;
    let upper = head.to_uppercase();
    let mut parts = upper.splitn(2, '.');
    let base = parts.next()?;
    let valid_base = base.len() == 5
        && base.starts_with('T')
        && base[1..].chars().all(|c| c.is_ascii_digit());
    if !valid_base {
        return None;
    }
    match parts.next() {
        None => Some(base.to_string()),
        Some(sub) if sub.len() == 3 && sub.chars().all(|c| c.is_ascii_digit()) => Some(upper),
        Some(_) => Some(base.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_exact_and_parent() {
        assert_eq!(lookup("T1566").unwrap().name, "Phishing");
        assert_eq!(lookup("T1566.001").unwrap().name, "Spearphishing Attachment");
        // Unlisted sub-technique resolves to parent
        assert_eq!(lookup("T1059.007").unwrap().id, "T1059");
        assert!(lookup("T9999").is_none());
        assert!(lookup("phishing").is_none());
    }

    #[test]
    fn test_technique_id_parsing() {
        assert_eq!(technique_id("t1059.001 PowerShell"), Some("T1059.001".to_string()));
        assert_eq!(technique_id("T1566: Phishing"), Some("T1566".to_string()));
        assert_eq!(technique_id("T15"), None);
        assert_eq!(technique_id(""), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("T1486"), "T1486 (Data Encrypted for Impact)");
        assert_eq!(display_name("Custom TTP"), "Custom TTP");
        assert_eq!(tactic_of("T1110"), Some(MitreTactic::CredentialAccess));
    }
}
