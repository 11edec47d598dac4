use serde::Serialize;

/// Компонента неопределённости позиции.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    /// `sqrt((E² + N²) / 2)`
    Horizontal,
    /// Совпадает с `U`
    Vertical,
    /// Восток
    E,
    /// Север
    N,
    /// Вверх
    U,
}

/// Значение для каждой из пяти компонент.
///
/// Сериализуется как отображение с ключами `horizontal`, `vertical`, `E`, `N`,
/// `U`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PerComponent<T> {
    pub horizontal: T,
    pub vertical: T,
    #[serde(rename = "E")]
    pub e: T,
    #[serde(rename = "N")]
    pub n: T,
    #[serde(rename = "U")]
    pub u: T,
}

impl Component {
    /// Все компоненты в порядке вывода.
    pub const ALL: [Component; 5] = [
        Component::Horizontal,
        Component::Vertical,
        Component::E,
        Component::N,
        Component::U,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Horizontal => "horizontal",
            Component::Vertical => "vertical",
            Component::E => "E",
            Component::N => "N",
            Component::U => "U",
        }
    }
}

impl<T> PerComponent<T> {
    /// Строит значение для каждой компоненты.
    pub fn from_fn<F: FnMut(Component) -> T>(mut f: F) -> Self {
        Self {
            horizontal: f(Component::Horizontal),
            vertical: f(Component::Vertical),
            e: f(Component::E),
            n: f(Component::N),
            u: f(Component::U),
        }
    }

    pub fn get(
        &self,
        component: Component,
    ) -> &T {
        match component {
            Component::Horizontal => &self.horizontal,
            Component::Vertical => &self.vertical,
            Component::E => &self.e,
            Component::N => &self.n,
            Component::U => &self.u,
        }
    }

    pub fn map<U, F: FnMut(&T) -> U>(
        &self,
        mut f: F,
    ) -> PerComponent<U> {
        PerComponent::from_fn(|c| f(self.get(c)))
    }

    /// Пары `(компонента, значение)` в порядке [`Component::ALL`].
    pub fn iter(&self) -> impl Iterator<Item = (Component, &T)> {
        Component::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl std::fmt::Display for Component {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_component_lookup() {
        let values = PerComponent::from_fn(|c| c.as_str().len());

        assert_eq!(*values.get(Component::Horizontal), 10);
        assert_eq!(*values.get(Component::E), 1);

        let order: Vec<_> = values.iter().map(|(c, _)| c).collect();
        assert_eq!(order, Component::ALL.to_vec());
    }

    #[test]
    fn test_per_component_keys() {
        let values = PerComponent::from_fn(|_| 0u8);
        let json = serde_json::to_value(values).unwrap();

        for c in Component::ALL {
            assert!(json.get(c.as_str()).is_some(), "missing key {c}");
        }
    }
}
