

mod serializers;
