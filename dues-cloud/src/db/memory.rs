//! In-process store
//!
//! All tables live behind a single `RwLock`, so each trait call is atomic
//! with respect to every other call. Ids come from one sequential counter
//! shared by all tables.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{
    Expense, ExpenseCreate, ExpenseUpdate, FeeEvent, FeeEventCreate, FeeEventUpdate, Member,
    MemberCreate, MemberStatus, MemberUpdate, Payment, PaymentStatus, Profile, Role, Team,
};
use shared::util::now_millis;

use super::{PaymentFilter, PaymentSeed, PaymentWrite, Store, StoreResult};

#[derive(Default)]
struct Tables {
    next_id: i64,
    profiles: HashMap<String, Profile>,
    teams: BTreeMap<i64, Team>,
    members: BTreeMap<i64, Member>,
    fee_events: BTreeMap<i64, FeeEvent>,
    payments: BTreeMap<i64, Payment>,
    /// (member_id, fee_event_id) uniqueness
    payment_keys: HashSet<(i64, i64)>,
    expenses: BTreeMap<i64, Expense>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn drop_payments_where(&mut self, pred: impl Fn(&Payment) -> bool) {
        let keys = &mut self.payment_keys;
        self.payments.retain(|_, p| {
            if pred(p) {
                keys.remove(&(p.member_id, p.fee_event_id));
                false
            } else {
                true
            }
        });
    }
}

/// Store backed by process memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a profile as-is (fixtures for states the ledger cannot reach)
    #[cfg(test)]
    pub(crate) fn put_profile(&self, profile: Profile) {
        self.tables
            .write()
            .profiles
            .insert(profile.id.clone(), profile);
    }

    #[cfg(test)]
    pub(crate) fn team_count(&self) -> usize {
        self.tables.read().teams.len()
    }
}

fn owned<'a, T>(
    rows: &'a BTreeMap<i64, T>,
    team_id: i64,
    team_of: impl Fn(&T) -> i64 + 'a,
) -> impl Iterator<Item = &'a T> + 'a {
    rows.values().filter(move |r| team_of(r) == team_id)
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_profile(&self, profile_id: &str) -> StoreResult<Option<Profile>> {
        Ok(self.tables.read().profiles.get(profile_id).cloned())
    }

    async fn create_team_with_admin(
        &self,
        team_name: &str,
        profile_id: &str,
        display_name: &str,
    ) -> StoreResult<Option<(Team, Profile)>> {
        let mut t = self.tables.write();
        if t.profiles.get(profile_id).is_some_and(|p| p.team_id.is_some()) {
            return Ok(None);
        }
        let team = Team {
            id: t.next_id(),
            name: team_name.to_string(),
            created_at: now_millis(),
        };
        let profile = Profile {
            id: profile_id.to_string(),
            team_id: Some(team.id),
            role: Role::Admin,
            display_name: display_name.to_string(),
        };
        t.teams.insert(team.id, team.clone());
        t.profiles.insert(profile.id.clone(), profile.clone());
        Ok(Some((team, profile)))
    }

    async fn join_team(
        &self,
        team_id: i64,
        profile_id: &str,
        display_name: &str,
    ) -> StoreResult<Option<Profile>> {
        let mut t = self.tables.write();
        let role = match t.profiles.get(profile_id) {
            Some(p) if p.team_id == Some(team_id) => p.role,
            Some(p) if p.team_id.is_some() => return Ok(None),
            _ => Role::Member,
        };
        let profile = Profile {
            id: profile_id.to_string(),
            team_id: Some(team_id),
            role,
            display_name: display_name.to_string(),
        };
        t.profiles.insert(profile.id.clone(), profile.clone());
        Ok(Some(profile))
    }

    async fn find_team(&self, team_id: i64) -> StoreResult<Option<Team>> {
        Ok(self.tables.read().teams.get(&team_id).cloned())
    }

    async fn rename_team(&self, team_id: i64, name: &str) -> StoreResult<Option<Team>> {
        let mut t = self.tables.write();
        Ok(t.teams.get_mut(&team_id).map(|team| {
            team.name = name.to_string();
            team.clone()
        }))
    }

    // ── Members ──

    async fn list_members(&self, team_id: i64) -> StoreResult<Vec<Member>> {
        let t = self.tables.read();
        let mut rows: Vec<Member> = owned(&t.members, team_id, |m| m.team_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.furigana.cmp(&b.furigana).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn list_members_by_status(
        &self,
        team_id: i64,
        status: MemberStatus,
    ) -> StoreResult<Vec<Member>> {
        let mut rows = self.list_members(team_id).await?;
        rows.retain(|m| m.status == status);
        Ok(rows)
    }

    async fn find_member(&self, team_id: i64, id: i64) -> StoreResult<Option<Member>> {
        let t = self.tables.read();
        Ok(t.members.get(&id).filter(|m| m.team_id == team_id).cloned())
    }

    async fn find_members_by_ids(&self, team_id: i64, ids: &[i64]) -> StoreResult<Vec<Member>> {
        let t = self.tables.read();
        Ok(ids
            .iter()
            .filter_map(|id| t.members.get(id))
            .filter(|m| m.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn insert_member(&self, team_id: i64, data: &MemberCreate) -> StoreResult<Member> {
        let mut t = self.tables.write();
        let member = Member {
            id: t.next_id(),
            team_id,
            name: data.name.clone(),
            furigana: data.furigana.clone(),
            position: data.position.clone(),
            contact: data.contact.clone(),
            address: data.address.clone(),
            status: MemberStatus::Active,
            created_at: now_millis(),
        };
        t.members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn update_member(
        &self,
        team_id: i64,
        id: i64,
        data: &MemberUpdate,
    ) -> StoreResult<Option<Member>> {
        let mut t = self.tables.write();
        let Some(m) = t.members.get_mut(&id).filter(|m| m.team_id == team_id) else {
            return Ok(None);
        };
        if let Some(v) = &data.name {
            m.name = v.clone();
        }
        if let Some(v) = &data.furigana {
            m.furigana = v.clone();
        }
        if let Some(v) = &data.position {
            m.position = v.clone();
        }
        if let Some(v) = &data.contact {
            m.contact = v.clone();
        }
        if let Some(v) = &data.address {
            m.address = v.clone();
        }
        if let Some(v) = data.status {
            m.status = v;
        }
        Ok(Some(m.clone()))
    }

    async fn delete_member(&self, team_id: i64, id: i64) -> StoreResult<bool> {
        let mut t = self.tables.write();
        if !t.members.get(&id).is_some_and(|m| m.team_id == team_id) {
            return Ok(false);
        }
        t.members.remove(&id);
        t.drop_payments_where(|p| p.member_id == id);
        Ok(true)
    }

    // ── Fee events ──

    async fn list_fee_events(&self, team_id: i64) -> StoreResult<Vec<FeeEvent>> {
        let t = self.tables.read();
        let mut rows: Vec<FeeEvent> = owned(&t.fee_events, team_id, |e| e.team_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.due_date.cmp(&a.due_date).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn find_fee_event(&self, team_id: i64, id: i64) -> StoreResult<Option<FeeEvent>> {
        let t = self.tables.read();
        Ok(t.fee_events
            .get(&id)
            .filter(|e| e.team_id == team_id)
            .cloned())
    }

    async fn find_fee_events_by_ids(
        &self,
        team_id: i64,
        ids: &[i64],
    ) -> StoreResult<Vec<FeeEvent>> {
        let t = self.tables.read();
        Ok(ids
            .iter()
            .filter_map(|id| t.fee_events.get(id))
            .filter(|e| e.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn insert_fee_event(
        &self,
        team_id: i64,
        data: &FeeEventCreate,
    ) -> StoreResult<FeeEvent> {
        let mut t = self.tables.write();
        let event = FeeEvent {
            id: t.next_id(),
            team_id,
            title: data.title.clone(),
            amount: data.amount,
            due_date: data.due_date,
            note: data.note.clone(),
            created_at: now_millis(),
        };
        t.fee_events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn update_fee_event(
        &self,
        team_id: i64,
        id: i64,
        data: &FeeEventUpdate,
    ) -> StoreResult<Option<FeeEvent>> {
        let mut t = self.tables.write();
        let Some(e) = t.fee_events.get_mut(&id).filter(|e| e.team_id == team_id) else {
            return Ok(None);
        };
        if let Some(v) = &data.title {
            e.title = v.clone();
        }
        if let Some(v) = data.amount {
            e.amount = v;
        }
        if let Some(v) = data.due_date {
            e.due_date = v;
        }
        if let Some(v) = &data.note {
            e.note = v.clone();
        }
        Ok(Some(e.clone()))
    }

    async fn delete_fee_event(&self, team_id: i64, id: i64) -> StoreResult<bool> {
        let mut t = self.tables.write();
        if !t.fee_events.get(&id).is_some_and(|e| e.team_id == team_id) {
            return Ok(false);
        }
        t.fee_events.remove(&id);
        t.drop_payments_where(|p| p.fee_event_id == id);
        Ok(true)
    }

    // ── Payments ──

    async fn list_payments(
        &self,
        team_id: i64,
        filter: PaymentFilter,
    ) -> StoreResult<Vec<Payment>> {
        let t = self.tables.read();
        Ok(owned(&t.payments, team_id, |p| p.team_id)
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn find_payment(&self, team_id: i64, id: i64) -> StoreResult<Option<Payment>> {
        let t = self.tables.read();
        Ok(t.payments.get(&id).filter(|p| p.team_id == team_id).cloned())
    }

    async fn insert_payments_ignore_duplicates(
        &self,
        team_id: i64,
        seeds: &[PaymentSeed],
    ) -> StoreResult<u64> {
        let mut t = self.tables.write();
        let mut inserted = 0;
        for seed in seeds {
            if !t.payment_keys.insert((seed.member_id, seed.fee_event_id)) {
                continue;
            }
            let payment = Payment {
                id: t.next_id(),
                team_id,
                member_id: seed.member_id,
                fee_event_id: seed.fee_event_id,
                status: PaymentStatus::Unpaid,
                paid_at: None,
                method: None,
                note: String::new(),
            };
            t.payments.insert(payment.id, payment);
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn write_payment_status(
        &self,
        team_id: i64,
        id: i64,
        write: &PaymentWrite,
    ) -> StoreResult<Option<Payment>> {
        let mut t = self.tables.write();
        let Some(p) = t.payments.get_mut(&id).filter(|p| p.team_id == team_id) else {
            return Ok(None);
        };
        p.status = write.status;
        p.paid_at = write.paid_at;
        p.method = write.method;
        p.note = write.note.clone();
        Ok(Some(p.clone()))
    }

    // ── Expenses ──

    async fn list_expenses(&self, team_id: i64) -> StoreResult<Vec<Expense>> {
        let t = self.tables.read();
        let mut rows: Vec<Expense> = owned(&t.expenses, team_id, |e| e.team_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn find_expense(&self, team_id: i64, id: i64) -> StoreResult<Option<Expense>> {
        let t = self.tables.read();
        Ok(t.expenses.get(&id).filter(|e| e.team_id == team_id).cloned())
    }

    async fn insert_expense(&self, team_id: i64, data: &ExpenseCreate) -> StoreResult<Expense> {
        let mut t = self.tables.write();
        let expense = Expense {
            id: t.next_id(),
            team_id,
            date: data.date,
            amount: data.amount,
            category: data.category.clone(),
            note: data.note.clone(),
            registered_by: data.registered_by.clone(),
            created_at: now_millis(),
        };
        t.expenses.insert(expense.id, expense.clone());
        Ok(expense)
    }

    async fn update_expense(
        &self,
        team_id: i64,
        id: i64,
        data: &ExpenseUpdate,
    ) -> StoreResult<Option<Expense>> {
        let mut t = self.tables.write();
        let Some(e) = t.expenses.get_mut(&id).filter(|e| e.team_id == team_id) else {
            return Ok(None);
        };
        if let Some(v) = data.date {
            e.date = v;
        }
        if let Some(v) = data.amount {
            e.amount = v;
        }
        if let Some(v) = &data.category {
            e.category = v.clone();
        }
        if let Some(v) = &data.note {
            e.note = v.clone();
        }
        if let Some(v) = &data.registered_by {
            e.registered_by = v.clone();
        }
        Ok(Some(e.clone()))
    }

    async fn delete_expense(&self, team_id: i64, id: i64) -> StoreResult<bool> {
        let mut t = self.tables.write();
        if !t.expenses.get(&id).is_some_and(|e| e.team_id == team_id) {
            return Ok(false);
        }
        t.expenses.remove(&id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn member(name: &str, furigana: &str) -> MemberCreate {
        MemberCreate {
            name: name.into(),
            furigana: furigana.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_members_sorted_by_furigana() {
        let store = MemoryStore::new();
        store.insert_member(1, &member("B", "b")).await.unwrap();
        store.insert_member(1, &member("A", "a")).await.unwrap();
        let names: Vec<_> = store
            .list_members(1)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_furigana_order_is_code_point_order() {
        let store = MemoryStore::new();
        for (name, furigana) in [("加藤", "カトウ"), ("佐藤", "さとう"), ("Zed", "Zed"), ("阿部", "あべ")] {
            store.insert_member(1, &member(name, furigana)).await.unwrap();
        }
        let order: Vec<_> = store
            .list_members(1)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.furigana)
            .collect();
        // ASCII, then hiragana, then katakana
        assert_eq!(order, vec!["Zed", "あべ", "さとう", "カトウ"]);
    }

    #[tokio::test]
    async fn test_payment_seed_uniqueness() {
        let store = MemoryStore::new();
        let seeds = [
            PaymentSeed {
                member_id: 10,
                fee_event_id: 20,
            },
            PaymentSeed {
                member_id: 10,
                fee_event_id: 20,
            },
        ];
        assert_eq!(
            store.insert_payments_ignore_duplicates(1, &seeds).await.unwrap(),
            1
        );
        assert_eq!(
            store.insert_payments_ignore_duplicates(1, &seeds).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_delete_fee_event_cascades_to_payments() {
        let store = MemoryStore::new();
        let m = store.insert_member(1, &member("A", "a")).await.unwrap();
        let e = store
            .insert_fee_event(
                1,
                &FeeEventCreate {
                    title: "April".into(),
                    amount: 1000,
                    due_date: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
                    note: String::new(),
                },
            )
            .await
            .unwrap();
        let seed = PaymentSeed {
            member_id: m.id,
            fee_event_id: e.id,
        };
        store
            .insert_payments_ignore_duplicates(1, &[seed])
            .await
            .unwrap();

        assert!(store.delete_fee_event(1, e.id).await.unwrap());
        assert!(store
            .list_payments(1, PaymentFilter::all())
            .await
            .unwrap()
            .is_empty());
        // key freed with the row
        assert_eq!(
            store
                .insert_payments_ignore_duplicates(1, &[seed])
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_rows_invisible_to_other_team() {
        let store = MemoryStore::new();
        let m = store.insert_member(1, &member("A", "a")).await.unwrap();
        assert!(store.find_member(2, m.id).await.unwrap().is_none());
        assert!(
            store
                .update_member(2, m.id, &MemberUpdate::default())
                .await
                .unwrap()
                .is_none()
        );
        assert!(!store.delete_member(2, m.id).await.unwrap());
        assert!(store.find_member(1, m.id).await.unwrap().is_some());
    }
}
