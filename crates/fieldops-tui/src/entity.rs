//! Entity plumbing for the console
//!
//! The five backend collections share one screen flow, so the app works
//! against a `Record`/`Collection` pair of enums instead of five copies of
//! every view.

use fieldops_core::{
    filter_records, Complaint, DomainError, Invoice, Maintenance, Project, Searchable,
    ServiceVisit, StatusFilter, TrackedValue, User, WorkStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EntityKind {
    Projects,
    Complaints,
    Maintenances,
    Invoices,
    Users,
}

impl EntityKind {
    pub fn all() -> [EntityKind; 5] {
        [
            EntityKind::Projects,
            EntityKind::Complaints,
            EntityKind::Maintenances,
            EntityKind::Invoices,
            EntityKind::Users,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Projects => "Projects",
            EntityKind::Complaints => "Complaints",
            EntityKind::Maintenances => "Maintenances",
            EntityKind::Invoices => "Invoices",
            EntityKind::Users => "Users",
        }
    }

    /// Status vocabulary offered by the list filter selector.
    pub fn status_options(&self) -> Vec<&'static str> {
        match self {
            EntityKind::Projects | EntityKind::Complaints | EntityKind::Maintenances => {
                WorkStatus::all().iter().map(|s| s.label()).collect()
            }
            EntityKind::Invoices => vec!["Pending", "Paid", "Overdue"],
            EntityKind::Users => vec!["pending", "approved", "rejected"],
        }
    }

    /// Worker assignment exists for projects and complaints only.
    pub fn supports_assignment(&self) -> bool {
        matches!(self, EntityKind::Projects | EntityKind::Complaints)
    }

    pub fn supports_photos(&self) -> bool {
        matches!(self, EntityKind::Projects | EntityKind::Complaints)
    }
}

/// Which repeatable sub-array of a record an append/remove targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubList {
    JcReferences,
    DcReferences,
    VisitDates,
    ServiceVisits,
}

impl SubList {
    pub fn label(&self) -> &'static str {
        match self {
            SubList::JcReferences => "JC References",
            SubList::DcReferences => "DC References",
            SubList::VisitDates => "Visit Dates",
            SubList::ServiceVisits => "Service Visits",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Project(Project),
    Complaint(Complaint),
    Maintenance(Maintenance),
    Invoice(Invoice),
    User(User),
}

impl Record {
    pub fn empty(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Projects => Record::Project(Project::default()),
            EntityKind::Complaints => Record::Complaint(Complaint::default()),
            EntityKind::Maintenances => Record::Maintenance(Maintenance::default()),
            EntityKind::Invoices => Record::Invoice(Invoice::default()),
            EntityKind::Users => Record::User(User::default()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Project(_) => EntityKind::Projects,
            Record::Complaint(_) => EntityKind::Complaints,
            Record::Maintenance(_) => EntityKind::Maintenances,
            Record::Invoice(_) => EntityKind::Invoices,
            Record::User(_) => EntityKind::Users,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Record::Project(r) => &r.id,
            Record::Complaint(r) => &r.id,
            Record::Maintenance(r) => &r.id,
            Record::Invoice(r) => &r.id,
            Record::User(r) => &r.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Record::Project(r) => &r.client_name,
            Record::Complaint(r) => &r.client_name,
            Record::Maintenance(r) => &r.client_name,
            Record::Invoice(r) => &r.invoice_reference,
            Record::User(r) => &r.name,
        }
    }

    pub fn status_label(&self) -> &str {
        match self {
            Record::Project(r) => r.status.label(),
            Record::Complaint(r) => r.status.label(),
            Record::Maintenance(r) => r.status.label(),
            Record::Invoice(r) => &r.status,
            Record::User(r) => r.status.label(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            Record::Project(r) => r.validate(),
            Record::Complaint(r) => r.validate(),
            Record::Maintenance(r) => r.validate(),
            Record::Invoice(r) => r.validate(),
            Record::User(_) => Ok(()),
        }
    }

    pub fn assigned_workers(&self) -> Option<&[String]> {
        match self {
            Record::Project(r) => Some(&r.assigned_workers),
            Record::Complaint(r) => Some(&r.assigned_workers),
            _ => None,
        }
    }

    pub fn set_assigned_workers(&mut self, ids: Vec<String>) {
        match self {
            Record::Project(r) => r.assigned_workers = ids,
            Record::Complaint(r) => r.assigned_workers = ids,
            _ => {}
        }
    }

    pub fn photos(&self) -> Option<&Vec<fieldops_core::Photo>> {
        match self {
            Record::Project(r) => Some(&r.survey_photos),
            Record::Complaint(r) => Some(&r.photos),
            _ => None,
        }
    }

    pub fn set_photos(&mut self, photos: Vec<fieldops_core::Photo>) {
        match self {
            Record::Project(r) => r.survey_photos = photos,
            Record::Complaint(r) => r.photos = photos,
            _ => {}
        }
    }

    /// Cancellation is the "delete" for business records. Users are hard
    /// deleted instead and return false here.
    pub fn cancel(&mut self) -> bool {
        match self {
            Record::Project(r) => {
                r.status = WorkStatus::Cancelled;
                true
            }
            Record::Complaint(r) => {
                r.status = WorkStatus::Cancelled;
                true
            }
            Record::Maintenance(r) => {
                r.status = WorkStatus::Cancelled;
                true
            }
            Record::Invoice(r) => {
                r.status = "Cancelled".into();
                true
            }
            Record::User(_) => false,
        }
    }

    pub fn sub_lists(&self) -> Vec<SubList> {
        match self {
            Record::Project(_) => vec![SubList::JcReferences, SubList::DcReferences],
            Record::Complaint(_) => {
                vec![SubList::JcReferences, SubList::DcReferences, SubList::VisitDates]
            }
            Record::Maintenance(_) => vec![SubList::ServiceVisits],
            _ => Vec::new(),
        }
    }

    pub fn sub_list_len(&self, list: SubList) -> usize {
        match (self, list) {
            (Record::Project(r), SubList::JcReferences) => r.jc_references.len(),
            (Record::Project(r), SubList::DcReferences) => r.dc_references.len(),
            (Record::Complaint(r), SubList::JcReferences) => r.jc_references.len(),
            (Record::Complaint(r), SubList::DcReferences) => r.dc_references.len(),
            (Record::Complaint(r), SubList::VisitDates) => r.visit_dates.len(),
            (Record::Maintenance(r), SubList::ServiceVisits) => r.service_visits.len(),
            _ => 0,
        }
    }

    /// Append one empty entry to the targeted sub-array.
    pub fn append_sub_entry(&mut self, list: SubList) {
        match (self, list) {
            (Record::Project(r), SubList::JcReferences) => {
                r.jc_references.push(TrackedValue::default())
            }
            (Record::Project(r), SubList::DcReferences) => {
                r.dc_references.push(TrackedValue::default())
            }
            (Record::Complaint(r), SubList::JcReferences) => {
                r.jc_references.push(TrackedValue::default())
            }
            (Record::Complaint(r), SubList::DcReferences) => {
                r.dc_references.push(TrackedValue::default())
            }
            (Record::Complaint(r), SubList::VisitDates) => {
                r.visit_dates.push(chrono::Utc::now().date_naive())
            }
            (Record::Maintenance(r), SubList::ServiceVisits) => {
                r.service_visits.push(ServiceVisit::default())
            }
            _ => {}
        }
    }

    /// Display string for one sub-array entry.
    pub fn sub_list_entry(&self, list: SubList, index: usize) -> Option<String> {
        fn tracked(items: &[TrackedValue], index: usize) -> Option<String> {
            items.get(index).map(|t| t.value.clone())
        }
        match (self, list) {
            (Record::Project(r), SubList::JcReferences) => tracked(&r.jc_references, index),
            (Record::Project(r), SubList::DcReferences) => tracked(&r.dc_references, index),
            (Record::Complaint(r), SubList::JcReferences) => tracked(&r.jc_references, index),
            (Record::Complaint(r), SubList::DcReferences) => tracked(&r.dc_references, index),
            (Record::Complaint(r), SubList::VisitDates) => {
                r.visit_dates.get(index).map(|d| d.to_string())
            }
            (Record::Maintenance(r), SubList::ServiceVisits) => {
                r.service_visits.get(index).map(|v| {
                    let date = v
                        .service_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "unscheduled".to_string());
                    let done = if v.is_completed { "done" } else { "open" };
                    format!("{date}  JC {}  {}", v.jc_reference, done)
                })
            }
            _ => None,
        }
    }

    /// Remove the entry at `index`; out-of-range indices are ignored.
    pub fn remove_sub_entry(&mut self, list: SubList, index: usize) {
        fn remove_at<T>(items: &mut Vec<T>, index: usize) {
            if index < items.len() {
                items.remove(index);
            }
        }
        match (self, list) {
            (Record::Project(r), SubList::JcReferences) => remove_at(&mut r.jc_references, index),
            (Record::Project(r), SubList::DcReferences) => remove_at(&mut r.dc_references, index),
            (Record::Complaint(r), SubList::JcReferences) => remove_at(&mut r.jc_references, index),
            (Record::Complaint(r), SubList::DcReferences) => remove_at(&mut r.dc_references, index),
            (Record::Complaint(r), SubList::VisitDates) => remove_at(&mut r.visit_dates, index),
            (Record::Maintenance(r), SubList::ServiceVisits) => {
                remove_at(&mut r.service_visits, index)
            }
            _ => {}
        }
    }
}

/// One fetched collection held by a list screen for its lifetime.
#[derive(Debug, Clone)]
pub enum Collection {
    Projects(Vec<Project>),
    Complaints(Vec<Complaint>),
    Maintenances(Vec<Maintenance>),
    Invoices(Vec<Invoice>),
    Users(Vec<User>),
}

impl Collection {
    pub fn empty(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Projects => Collection::Projects(Vec::new()),
            EntityKind::Complaints => Collection::Complaints(Vec::new()),
            EntityKind::Maintenances => Collection::Maintenances(Vec::new()),
            EntityKind::Invoices => Collection::Invoices(Vec::new()),
            EntityKind::Users => Collection::Users(Vec::new()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Collection::Projects(_) => EntityKind::Projects,
            Collection::Complaints(_) => EntityKind::Complaints,
            Collection::Maintenances(_) => EntityKind::Maintenances,
            Collection::Invoices(_) => EntityKind::Invoices,
            Collection::Users(_) => EntityKind::Users,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Collection::Projects(v) => v.len(),
            Collection::Complaints(v) => v.len(),
            Collection::Maintenances(v) => v.len(),
            Collection::Invoices(v) => v.len(),
            Collection::Users(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Indices passing the search and status predicates, insertion order.
    pub fn filtered(&self, search: &str, status: &StatusFilter) -> Vec<usize> {
        match self {
            Collection::Projects(v) => filter_records(v, search, status),
            Collection::Complaints(v) => filter_records(v, search, status),
            Collection::Maintenances(v) => filter_records(v, search, status),
            Collection::Invoices(v) => filter_records(v, search, status),
            Collection::Users(v) => filter_records(v, search, status),
        }
    }

    pub fn record(&self, index: usize) -> Option<Record> {
        match self {
            Collection::Projects(v) => v.get(index).cloned().map(Record::Project),
            Collection::Complaints(v) => v.get(index).cloned().map(Record::Complaint),
            Collection::Maintenances(v) => v.get(index).cloned().map(Record::Maintenance),
            Collection::Invoices(v) => v.get(index).cloned().map(Record::Invoice),
            Collection::Users(v) => v.get(index).cloned().map(Record::User),
        }
    }

    /// Display row: title, secondary reference, status label.
    pub fn row(&self, index: usize) -> Option<(String, String, String)> {
        fn first_ref<T: Searchable>(item: &T) -> String {
            item.haystack().get(1).map(|s| s.to_string()).unwrap_or_default()
        }
        match self {
            Collection::Projects(v) => v.get(index).map(|r| {
                (r.client_name.clone(), first_ref(r), r.status.label().to_string())
            }),
            Collection::Complaints(v) => v.get(index).map(|r| {
                (r.client_name.clone(), r.complaint_reference.clone(), r.status.label().to_string())
            }),
            Collection::Maintenances(v) => v.get(index).map(|r| {
                (r.client_name.clone(), String::new(), r.status.label().to_string())
            }),
            Collection::Invoices(v) => v.get(index).map(|r| {
                (r.invoice_reference.clone(), format!("{:.2}", r.amount), r.status.clone())
            }),
            Collection::Users(v) => v.get(index).map(|r| {
                (r.name.clone(), r.role.label().to_string(), r.status.label().to_string())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_then_remove_restores_sub_array() {
        let mut record = Record::Complaint(Complaint {
            id: "c-1".into(),
            client_name: "Acme".into(),
            jc_references: vec![TrackedValue::new("JC-1")],
            ..Default::default()
        });
        let before = record.clone();

        record.append_sub_entry(SubList::JcReferences);
        assert_eq!(record.sub_list_len(SubList::JcReferences), 2);

        record.remove_sub_entry(SubList::JcReferences, 1);
        assert_eq!(record, before);
    }

    #[test]
    fn remove_out_of_range_is_ignored() {
        let mut record = Record::Project(Project::default());
        record.remove_sub_entry(SubList::JcReferences, 3);
        assert_eq!(record.sub_list_len(SubList::JcReferences), 0);
    }

    #[test]
    fn cancel_marks_business_records_but_not_users() {
        let mut project = Record::Project(Project {
            client_name: "Acme".into(),
            ..Default::default()
        });
        assert!(project.cancel());
        assert_eq!(project.status_label(), "Cancelled");

        let mut user = Record::User(User::default());
        assert!(!user.cancel());
    }

    #[test]
    fn collection_filter_delegates_to_core() {
        let collection = Collection::Projects(vec![
            Project {
                id: "p-1".into(),
                client_name: "Acme".into(),
                ..Default::default()
            },
            Project {
                id: "p-2".into(),
                client_name: "Beta".into(),
                status: WorkStatus::Completed,
                ..Default::default()
            },
        ]);

        let hits = collection.filtered("beta", &StatusFilter::All);
        assert_eq!(hits, vec![1]);
        let hits = collection.filtered("", &StatusFilter::Only("Completed".into()));
        assert_eq!(hits, vec![1]);
    }
}
