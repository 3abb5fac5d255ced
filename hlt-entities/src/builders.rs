pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{blog_post_builder::*, place_builder::*};

pub mod place_builder {

    use super::*;
    use crate::{category::*, geo::*, id::Id, place::*};

    #[derive(Debug)]
    pub struct PlaceBuild {
        place: Place,
    }

    impl PlaceBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.place.id = id.into();
            self
        }
        pub fn category(mut self, category: CategoryId) -> Self {
            self.place.category = category;
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.place.title = title.into();
            self
        }
        pub fn location(mut self, location: &str) -> Self {
            self.place.location = location.into();
            self
        }
        pub fn short_description(mut self, desc: &str) -> Self {
            self.place.short_description = desc.into();
            self
        }
        pub fn full_description(mut self, desc: Option<&str>) -> Self {
            self.place.full_description = desc.map(Into::into);
            self
        }
        pub fn image_url(mut self, url: &str) -> Self {
            self.place.image_url = url.into();
            self
        }
        pub fn tags(mut self, tags: Vec<impl Into<String>>) -> Self {
            self.place.tags = tags.into_iter().map(|x| x.into()).collect();
            self
        }
        pub fn date(mut self, date: Option<&str>) -> Self {
            self.place.date = date.map(Into::into);
            self
        }
        pub fn rating(mut self, rating: Option<f64>) -> Self {
            self.place.rating = rating;
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.place.coordinates = Some(pos);
            self
        }
        pub fn weather(mut self, weather: WeatherInfo) -> Self {
            self.place.weather = Some(weather);
            self
        }
        pub fn hiking(mut self, hiking: HikingDetails) -> Self {
            self.place.hiking = Some(hiking);
            self
        }
        pub fn finish(self) -> Place {
            self.place
        }
    }

    impl Builder for Place {
        type Build = PlaceBuild;
        fn build() -> Self::Build {
            Self::Build {
                place: Place {
                    id: Id::new(),
                    category: CategoryId::Senderismo,
                    title: "".into(),
                    location: "".into(),
                    short_description: "".into(),
                    full_description: None,
                    image_url: "".into(),
                    tags: vec![],
                    weather: None,
                    hiking: None,
                    date: None,
                    rating: None,
                    coordinates: None,
                },
            }
        }
    }

}

pub mod blog_post_builder {

    use super::*;
    use crate::{blog::*, id::Id};

    #[derive(Debug)]
    pub struct BlogPostBuild {
        post: BlogPost,
    }

    impl BlogPostBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.post.id = id.into();
            self
        }
        pub fn slug(mut self, slug: &str) -> Self {
            self.post.slug = slug.into();
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.post.title = title.into();
            self
        }
        pub fn excerpt(mut self, excerpt: &str) -> Self {
            self.post.excerpt = excerpt.into();
            self
        }
        pub fn image_url(mut self, url: &str) -> Self {
            self.post.image_url = url.into();
            self
        }
        pub fn finish(self) -> BlogPost {
            self.post
        }
    }

    impl Builder for BlogPost {
        type Build = BlogPostBuild;
        fn build() -> Self::Build {
            Self::Build {
                post: BlogPost {
                    id: Id::new(),
                    slug: "".into(),
                    title: "".into(),
                    excerpt: "".into(),
                    content: "".into(),
                    author: "".into(),
                    date: "".into(),
                    read_time: "".into(),
                    image_url: "".into(),
                    tags: vec![],
                },
            }
        }
    }
}
