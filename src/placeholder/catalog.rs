//! Standard fields offered to template authors

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderField {
    pub name: &'static str,
    pub label: &'static str,
}

const fn field(name: &'static str, label: &'static str) -> PlaceholderField {
    PlaceholderField { name, label }
}

pub const STANDARD_FIELDS: [PlaceholderField; 20] = [
    field("studentName", "Student Name"),
    field("rollNumber", "Roll Number"),
    field("admissionNo", "Admission Number"),
    field("class", "Class"),
    field("section", "Section"),
    field("dob", "Date of Birth"),
    field("gender", "Gender"),
    field("fatherName", "Father Name"),
    field("motherName", "Mother Name"),
    field("address", "Address"),
    field("schoolName", "School Name"),
    field("examCenter", "Exam Center"),
    field("issueDate", "Issue Date"),
    field("validUntil", "Valid Until"),
    field("principalSignature", "Principal Signature"),
    field("classTeacherSignature", "Class Teacher Signature"),
    field("studentId", "Student ID"),
    field("verificationUrl", "Verification URL"),
    field("bloodGroup", "Blood Group"),
    field("studentPhoto", "Student Photo"),
];

/// Human label for a standard field
pub fn field_label(name: &str) -> Option<&'static str> {
    STANDARD_FIELDS
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.label)
}
