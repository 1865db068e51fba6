//! Typed game objects with per-player visibility.
//!
//! Rules collaborators register object types up front (name, required
//! properties, properties that are always public) and then create objects
//! through the [`EntityTable`]. Each object records which players may see it;
//! [`EntityTable::observe`] strips everything else before state leaves the
//! engine.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{TCell, TMap, TSet, Transactional, Value};
use crate::core::{EntityId, PlayerId};
use crate::error::RegistrationError;

/// Declaration of an object type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    pub name: String,
    /// Properties that must be supplied to `create`.
    pub required: Vec<String>,
    /// Properties every player sees, even on objects hidden from them.
    pub public: Vec<String>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: Vec::new(),
            public: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_required<I, S>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = props.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_public<I, S>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public = props.into_iter().map(Into::into).collect();
        self
    }

    fn is_public(&self, prop: &str) -> bool {
        self.public.iter().any(|p| p == prop)
    }
}

/// Who may see an object's private properties.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    /// Every player and every spectator.
    #[default]
    All,
    /// Only the listed players.
    Players(TSet<PlayerId>),
}

impl Visibility {
    /// Visible to exactly one player.
    #[must_use]
    pub fn only(player: PlayerId) -> Self {
        Visibility::Players(std::iter::once(player).collect())
    }

    /// Whether `viewer` may see the object. `None` is a spectator.
    #[must_use]
    pub fn allows(&self, viewer: Option<PlayerId>) -> bool {
        match (self, viewer) {
            (Visibility::All, _) => true,
            (Visibility::Players(set), Some(p)) => set.contains(&p),
            (Visibility::Players(_), None) => false,
        }
    }

    /// Add a player. `All` already includes everyone.
    pub fn reveal(&mut self, player: PlayerId) {
        if let Visibility::Players(set) = self {
            set.insert(player);
        }
    }

    /// Remove a player, narrowing `All` to `players` first.
    pub fn conceal(&mut self, player: PlayerId, players: &[PlayerId]) {
        if matches!(self, Visibility::All) {
            *self = Visibility::Players(players.iter().copied().collect());
        }
        if let Visibility::Players(set) = self {
            set.remove(&player);
        }
    }
}

impl Transactional for Visibility {
    fn begin(&mut self) {
        if let Visibility::Players(set) = self {
            set.begin();
        }
    }

    fn commit(&mut self) {
        if let Visibility::Players(set) = self {
            set.commit();
        }
    }

    fn abort(&mut self) {
        if let Visibility::Players(set) = self {
            set.abort();
        }
    }

    fn in_transaction(&self) -> bool {
        match self {
            Visibility::All => false,
            Visibility::Players(set) => set.in_transaction(),
        }
    }
}

/// An object stored in the entity table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObject {
    pub id: EntityId,
    pub obj_type: String,
    pub visibility: Visibility,
    pub props: TMap<String, Value>,
}

impl GameObject {
    #[must_use]
    pub fn get(&self, prop: &str) -> Option<&Value> {
        self.props.get(prop)
    }

    #[must_use]
    pub fn get_int(&self, prop: &str) -> Option<i64> {
        self.get(prop).and_then(Value::as_int)
    }

    pub fn set(&mut self, prop: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.props.insert(prop.into(), value.into())
    }

    /// Render as a map node: id, type, then properties.
    fn to_value(&self, keep: impl Fn(&str) -> bool) -> Value {
        let mut map = TMap::new();
        map.insert("id".to_string(), Value::from(self.id));
        map.insert("type".to_string(), Value::from(self.obj_type.as_str()));
        for (k, v) in self.props.iter().filter(|(k, _)| keep(k.as_str())) {
            map.insert(k.clone(), v.clone());
        }
        Value::Map(map)
    }
}

impl Transactional for GameObject {
    fn begin(&mut self) {
        self.visibility.begin();
        self.props.begin();
    }

    fn commit(&mut self) {
        self.visibility.commit();
        self.props.commit();
    }

    fn abort(&mut self) {
        self.visibility.abort();
        self.props.abort();
    }

    fn in_transaction(&self) -> bool {
        self.props.in_transaction()
    }
}

/// Registry and store of every game object.
///
/// Object types are setup data and are not rolled back; objects and the id
/// counter are.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityTable {
    types: FxHashMap<String, ObjectType>,
    objects: TMap<EntityId, GameObject>,
    next_id: TCell<u32>,
}

impl EntityTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an object type.
    pub fn register_type(&mut self, obj_type: ObjectType) -> Result<(), RegistrationError> {
        if self.types.contains_key(&obj_type.name) {
            return Err(RegistrationError::DuplicateType(obj_type.name));
        }
        self.types.insert(obj_type.name.clone(), obj_type);
        Ok(())
    }

    #[must_use]
    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        self.types.get(name)
    }

    /// Create an object of a registered type.
    ///
    /// Without an explicit `id` the next free sequential id is used.
    ///
    /// ## Example
    ///
    /// ```
    /// use rust_gsm::state::{EntityTable, ObjectType, Visibility};
    ///
    /// let mut table = EntityTable::new();
    /// table
    ///     .register_type(ObjectType::new("card").with_required(["power"]))
    ///     .unwrap();
    ///
    /// let id = table
    ///     .create("card", [("power", 3i64.into())], Visibility::All, None)
    ///     .unwrap();
    /// assert_eq!(table.get(id).unwrap().get_int("power"), Some(3));
    /// assert!(table
    ///     .create("card", [("owner", 1i64.into())], Visibility::All, None)
    ///     .is_err());
    /// ```
    pub fn create<I, S>(
        &mut self,
        obj_type: &str,
        props: I,
        visibility: Visibility,
        id: Option<EntityId>,
    ) -> Result<EntityId, RegistrationError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let info = self
            .types
            .get(obj_type)
            .ok_or_else(|| RegistrationError::UnknownType(obj_type.to_string()))?;

        let props: TMap<String, Value> = props.into_iter().map(|(k, v)| (k.into(), v)).collect();
        if let Some(missing) = info.required.iter().find(|r| !props.contains_key(r.as_str())) {
            return Err(RegistrationError::MissingProperty {
                obj_type: obj_type.to_string(),
                property: missing.clone(),
                required: info.required.clone(),
            });
        }

        let id = match id {
            Some(id) if self.objects.contains_key(&id) => {
                return Err(RegistrationError::IdCollision(id));
            }
            Some(id) => id,
            None => self.allocate_id(),
        };

        self.objects.insert(
            id,
            GameObject {
                id,
                obj_type: obj_type.to_string(),
                visibility,
                props,
            },
        );
        Ok(id)
    }

    fn allocate_id(&mut self) -> EntityId {
        let mut id = EntityId(*self.next_id.get());
        while self.objects.contains_key(&id) {
            id = id.next();
        }
        self.next_id.set(id.next().raw());
        id
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&GameObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut GameObject> {
        self.objects.get_mut(&id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<GameObject> {
        self.objects.remove(&id)
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.objects.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.values()
    }

    /// The table as seen by `viewer` (`None` for spectators).
    ///
    /// Objects the viewer may not see keep only their id, type and the
    /// properties their type declares public.
    #[must_use]
    pub fn observe(&self, viewer: Option<PlayerId>) -> Value {
        let list = self
            .objects
            .values()
            .map(|obj| {
                if obj.visibility.allows(viewer) {
                    obj.to_value(|_| true)
                } else {
                    let info = self.types.get(&obj.obj_type);
                    obj.to_value(|prop| info.is_some_and(|t| t.is_public(prop)))
                }
            })
            .collect();
        Value::List(list)
    }
}

impl Transactional for EntityTable {
    fn begin(&mut self) {
        self.objects.begin();
        self.next_id.begin();
    }

    fn commit(&mut self) {
        self.objects.commit();
        self.next_id.commit();
    }

    fn abort(&mut self) {
        self.objects.abort();
        self.next_id.abort();
    }

    fn in_transaction(&self) -> bool {
        self.objects.in_transaction()
    }
}
